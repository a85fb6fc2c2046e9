//! Plain-text rendering of the controller state.

use client_core::{ControllerView, SubmissionState};

pub fn render(view: &ControllerView) -> String {
    let mut lines = Vec::new();
    if let Some(name) = &view.file_name {
        lines.push(format!("Selected file: {name}"));
    }
    match &view.state {
        SubmissionState::Idle if view.can_submit => lines.push("Ready to process.".to_string()),
        SubmissionState::Idle => lines.push("No video selected.".to_string()),
        SubmissionState::Processing => lines.push("Processing video...".to_string()),
        SubmissionState::Success { result_url } => {
            lines.push("Video processed successfully.".to_string());
            lines.push(format!("Processed video: {result_url}"));
        }
        SubmissionState::Error { message } => lines.push(format!("Error: {message}")),
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(state: SubmissionState, file_name: Option<&str>) -> ControllerView {
        ControllerView {
            can_submit: file_name.is_some() && !state.is_processing(),
            state,
            file_name: file_name.map(str::to_owned),
        }
    }

    #[test]
    fn renders_success_with_result_url() {
        let url = "http://localhost:5000/download/processed_a.mp4"
            .parse()
            .expect("url");
        let text = render(&view(
            SubmissionState::Success { result_url: url },
            Some("a.mp4"),
        ));
        assert_eq!(
            text,
            "Selected file: a.mp4\nVideo processed successfully.\nProcessed video: http://localhost:5000/download/processed_a.mp4"
        );
    }

    #[test]
    fn renders_error_without_file() {
        let text = render(&view(
            SubmissionState::Error {
                message: "No video file provided".to_string(),
            },
            None,
        ));
        assert_eq!(text, "Error: No video file provided");
    }

    #[test]
    fn idle_text_depends_on_selection() {
        assert_eq!(render(&view(SubmissionState::Idle, None)), "No video selected.");
        assert_eq!(
            render(&view(SubmissionState::Idle, Some("a.mp4"))),
            "Selected file: a.mp4\nReady to process."
        );
    }
}
