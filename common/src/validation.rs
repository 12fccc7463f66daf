//! Client-side preconditions checked before anything is sent to the records
//! service.
//!
//! `validate` is pure. The form calls it after every change to decide whether
//! the submit action is enabled, and the submission path calls it once more
//! right before the request is built.

use crate::model::attachment::{AnswerSet, Attachment, AttachmentSet};

/// Extensions accepted in every slot.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Declared MIME types accepted in every slot. `image/jpg` is not registered
/// but some browsers report it.
pub const ALLOWED_MIME_TYPES: &[&str] =
    &["application/pdf", "image/jpeg", "image/jpg", "image/png"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a GR number")]
    MissingSelection,
    #[error("Please upload the {0} document")]
    MissingRequiredSlot(String),
    #[error("{0}: please upload either a PDF document or an image (JPEG, PNG)")]
    UnsupportedType(String),
    #[error("Please answer \"{0}\"")]
    MissingAncillaryAnswer(String),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

pub type ValidationResult = Result<(), ValidationError>;

/// Whether a single attachment may be sent: its extension must be allowed and,
/// when the platform declared a MIME type, that type must be allowed too.
pub fn is_supported<H>(attachment: &Attachment<H>) -> bool {
    let extension_ok = attachment
        .extension()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));
    let mime_ok = attachment.mime_type.as_deref().is_none_or(|mime| {
        let mime = mime.trim().to_ascii_lowercase();
        ALLOWED_MIME_TYPES.contains(&mime.as_str())
    });
    extension_ok && mime_ok
}

/// Checks the selection, every slot and every ancillary answer of the upload
/// type the attachment set belongs to. Slots are checked in declaration order,
/// then answers; the first failure is reported.
pub fn validate<H>(
    selected_id: Option<&str>,
    attachments: &AttachmentSet<H>,
    answers: &AnswerSet,
) -> ValidationResult {
    if selected_id.is_none_or(|id| id.trim().is_empty()) {
        return Err(ValidationError::MissingSelection);
    }

    let upload_type = attachments.upload_type();
    for slot in upload_type.slots() {
        match attachments.get(slot.name) {
            Some(attachment) if !is_supported(attachment) => {
                return Err(ValidationError::UnsupportedType(slot.name.to_string()));
            }
            None if slot.required => {
                return Err(ValidationError::MissingRequiredSlot(slot.name.to_string()));
            }
            _ => {}
        }
    }

    for answer in upload_type.answers() {
        let set = answers
            .get(answer.name)
            .is_some_and(|value| answer.accepts(value));
        if !set {
            return Err(ValidationError::MissingAncillaryAnswer(answer.name.to_string()));
        }
    }

    Ok(())
}

/// The credential form's only local rule. Not used by the upload flows.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> ValidationResult {
    if password == confirmation {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::upload::UploadType;

    fn file(name: &str, mime: Option<&str>) -> Attachment<()> {
        Attachment::new(name, mime.map(str::to_string), ())
    }

    fn academic(grade: Option<Attachment<()>>, appeared: Option<&str>) -> ValidationResult {
        let mut set = AttachmentSet::new(UploadType::AcademicPerformance);
        if let Some(grade) = grade {
            set.put("gradeHistory", grade).expect("known slot");
        }
        let mut answers = AnswerSet::default();
        if let Some(appeared) = appeared {
            answers.set("appearedForExam", appeared);
        }
        validate(Some("G001"), &set, &answers)
    }

    #[test]
    fn complete_academic_submission_passes() {
        assert_eq!(
            academic(Some(file("grades.png", Some("image/png"))), Some("yes")),
            Ok(())
        );
    }

    #[test]
    fn selection_is_checked_first() {
        let set = AttachmentSet::<()>::new(UploadType::Placement);
        let answers = AnswerSet::default();
        assert_eq!(
            validate(None, &set, &answers),
            Err(ValidationError::MissingSelection)
        );
        assert_eq!(
            validate(Some("  "), &set, &answers),
            Err(ValidationError::MissingSelection)
        );
    }

    #[test]
    fn missing_slot_and_answer_are_named() {
        assert_eq!(
            academic(None, Some("yes")),
            Err(ValidationError::MissingRequiredSlot("gradeHistory".into()))
        );
        assert_eq!(
            academic(Some(file("grades.pdf", None)), None),
            Err(ValidationError::MissingAncillaryAnswer("appearedForExam".into()))
        );
        assert_eq!(
            academic(Some(file("grades.pdf", None)), Some("maybe")),
            Err(ValidationError::MissingAncillaryAnswer("appearedForExam".into()))
        );
    }

    #[test]
    fn only_pdf_jpeg_and_png_are_accepted_in_any_case() {
        for name in ["a.pdf", "a.PDF", "a.jpg", "a.JpG", "a.jpeg", "a.JPEG", "a.png", "a.Png"] {
            assert!(is_supported(&file(name, None)), "{name} should be accepted");
        }
        for name in ["a.docx", "a.gif", "a.pdf.exe", "pdf", "a."] {
            assert!(!is_supported(&file(name, None)), "{name} should be rejected");
        }
    }

    #[test]
    fn declared_mime_type_must_agree() {
        assert!(is_supported(&file("scan.jpg", Some("IMAGE/JPEG"))));
        assert!(is_supported(&file("scan.jpg", Some("image/jpg"))));
        assert!(!is_supported(&file(
            "scan.pdf",
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        )));
        assert!(is_supported(&file("scan.pdf", Some("  "))));
    }

    #[test]
    fn unsupported_file_wins_over_missing_answer() {
        assert_eq!(
            academic(Some(file("grades.docx", None)), None),
            Err(ValidationError::UnsupportedType("gradeHistory".into()))
        );
    }

    #[test]
    fn every_enrollment_slot_is_required_whatever_the_attachment_order() {
        let names = ["gujcetResult", "tenthMarksheet", "registrationForm", "twelfthMarksheet"];
        let answers = AnswerSet::default();
        let mut set = AttachmentSet::new(UploadType::EnrollmentDocuments);
        for (index, name) in names.iter().enumerate() {
            assert!(validate(Some("G7"), &set, &answers).is_err());
            set.put(name, file(&format!("doc{index}.pdf"), None))
                .expect("known slot");
        }
        assert_eq!(validate(Some("G7"), &set, &answers), Ok(()));
    }

    #[test]
    fn password_confirmation() {
        assert_eq!(validate_password_confirmation("s3cret", "s3cret"), Ok(()));
        assert_eq!(
            validate_password_confirmation("s3cret", "secret"),
            Err(ValidationError::PasswordMismatch)
        );
    }
}
