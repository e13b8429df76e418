//! Status enumerations for application and interview workflows
//!
//! The backend stores free-text Vietnamese labels with no server-side
//! schema. The closed variants below cover every label the portal UI
//! emits; anything else round-trips through `Other` untouched instead of
//! failing the whole payload.

use serde::{Deserialize, Serialize};

/// Lifecycle of a candidate's application to a posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    /// "Đã nộp"
    Submitted,
    /// "Đang xem xét" - also the implicit default when the row has none
    UnderReview,
    /// "Mời phỏng vấn"
    InterviewInvited,
    /// "Từ chối"
    Rejected,
    /// "Trúng tuyển"
    Hired,
    /// Unrecognized label, preserved verbatim
    Other(String),
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::UnderReview
    }
}

impl From<String> for ApplicationStatus {
    fn from(label: String) -> Self {
        match label.trim() {
            "Đã nộp" => ApplicationStatus::Submitted,
            "Đang xem xét" | "" => ApplicationStatus::UnderReview,
            "Mời phỏng vấn" => ApplicationStatus::InterviewInvited,
            "Từ chối" => ApplicationStatus::Rejected,
            "Trúng tuyển" => ApplicationStatus::Hired,
            _ => ApplicationStatus::Other(label),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> String {
        match status {
            ApplicationStatus::Submitted => "Đã nộp".to_string(),
            ApplicationStatus::UnderReview => "Đang xem xét".to_string(),
            ApplicationStatus::InterviewInvited => "Mời phỏng vấn".to_string(),
            ApplicationStatus::Rejected => "Từ chối".to_string(),
            ApplicationStatus::Hired => "Trúng tuyển".to_string(),
            ApplicationStatus::Other(label) => label,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from(self.clone()))
    }
}

/// Candidate's answer to an interview invitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterviewStatus {
    /// "Chờ xác nhận"
    AwaitingConfirmation,
    /// "Đồng ý"
    Accepted,
    /// "Từ chối"
    Declined,
    /// "Đang chờ phản hồi"
    AwaitingReply,
    /// Unrecognized label, preserved verbatim
    Other(String),
}

impl From<String> for InterviewStatus {
    fn from(label: String) -> Self {
        match label.trim() {
            "Chờ xác nhận" => InterviewStatus::AwaitingConfirmation,
            "Đồng ý" => InterviewStatus::Accepted,
            "Từ chối" => InterviewStatus::Declined,
            "Đang chờ phản hồi" => InterviewStatus::AwaitingReply,
            _ => InterviewStatus::Other(label),
        }
    }
}

impl From<InterviewStatus> for String {
    fn from(status: InterviewStatus) -> String {
        match status {
            InterviewStatus::AwaitingConfirmation => "Chờ xác nhận".to_string(),
            InterviewStatus::Accepted => "Đồng ý".to_string(),
            InterviewStatus::Declined => "Từ chối".to_string(),
            InterviewStatus::AwaitingReply => "Đang chờ phản hồi".to_string(),
            InterviewStatus::Other(label) => label,
        }
    }
}

impl std::fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_application_labels_map_to_variants() {
        assert_eq!(
            ApplicationStatus::from("Đã nộp".to_string()),
            ApplicationStatus::Submitted
        );
        assert_eq!(
            ApplicationStatus::from("Trúng tuyển".to_string()),
            ApplicationStatus::Hired
        );
    }

    #[test]
    fn empty_application_label_defaults_to_under_review() {
        assert_eq!(
            ApplicationStatus::from(String::new()),
            ApplicationStatus::UnderReview
        );
    }

    #[test]
    fn unknown_label_survives_verbatim() {
        let status = ApplicationStatus::from("Hồ sơ bị khóa".to_string());
        assert_eq!(status, ApplicationStatus::Other("Hồ sơ bị khóa".to_string()));
        assert_eq!(String::from(status), "Hồ sơ bị khóa");
    }

    #[test]
    fn interview_labels_map_both_ways() {
        let status = InterviewStatus::from("Đang chờ phản hồi".to_string());
        assert_eq!(status, InterviewStatus::AwaitingReply);
        assert_eq!(String::from(status), "Đang chờ phản hồi");
    }
}
