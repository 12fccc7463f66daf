use serde::{Deserialize, Serialize};

/// Multipart field carrying the selected record identifier in every flow.
pub const ID_FIELD: &str = "gr_no";

/// Extensions accepted by the file inputs, in the form the `accept` attribute expects.
pub const ACCEPT_FILTER: &str = ".pdf,.jpg,.jpeg,.png";

/// Remote collection queried by `GET /pool/{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolKind {
    /// Every enrolled student.
    AllStudents,
    /// Students without a placement record.
    PendingPlacement,
    /// Students whose enrollment documents are still missing.
    PendingDocuments,
}

impl PoolKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            PoolKind::AllStudents => "all",
            PoolKind::PendingPlacement => "placement",
            PoolKind::PendingDocuments => "documents",
        }
    }
}

/// A named attachment position of an upload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    /// Key used by the client (`attach("proof", ..)`).
    pub name: &'static str,
    /// Multipart field name expected by the records service.
    pub field: &'static str,
    pub label: &'static str,
    pub required: bool,
}

/// One admissible value of an ancillary answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// A non-file scalar field required alongside the attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerSpec {
    pub name: &'static str,
    pub field: &'static str,
    pub label: &'static str,
    pub options: &'static [AnswerOption],
}

impl AnswerSpec {
    pub fn accepts(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

const ACADEMIC_SLOTS: &[SlotSpec] = &[SlotSpec {
    name: "gradeHistory",
    field: "grade_history",
    label: "Grade History",
    required: true,
}];

const ACADEMIC_ANSWERS: &[AnswerSpec] = &[AnswerSpec {
    name: "appearedForExam",
    field: "appeared_for_exam",
    label: "Has student appeared for exam?",
    options: &[
        AnswerOption { value: "yes", label: "Yes" },
        AnswerOption { value: "no", label: "No" },
    ],
}];

const PLACEMENT_SLOTS: &[SlotSpec] = &[SlotSpec {
    name: "proof",
    field: "proof",
    label: "Upload Document Proof (PDF or Image)",
    required: true,
}];

const PLACEMENT_ANSWERS: &[AnswerSpec] = &[AnswerSpec {
    name: "status",
    field: "status",
    label: "Student Status",
    options: &[
        AnswerOption {
            value: "placement",
            label: "Placed in Company/Government Sector",
        },
        AnswerOption {
            value: "higher-studies",
            label: "Higher Studies",
        },
        AnswerOption {
            value: "entrepreneur",
            label: "Entrepreneur",
        },
    ],
}];

const DOCUMENT_SLOTS: &[SlotSpec] = &[
    SlotSpec {
        name: "tenthMarksheet",
        field: "marks10",
        label: "10th Marksheet (PDF or Image)",
        required: true,
    },
    SlotSpec {
        name: "twelfthMarksheet",
        field: "marks12",
        label: "12th Marksheet (PDF or Image)",
        required: true,
    },
    SlotSpec {
        name: "registrationForm",
        field: "registration_form",
        label: "Registration Form (PDF or Image)",
        required: true,
    },
    SlotSpec {
        name: "gujcetResult",
        field: "gujcet",
        label: "GUJCET Marksheet (PDF or Image)",
        required: true,
    },
];

/// The distinct submission flows. Each one fixes its pool, its slots, its
/// answers and the multipart field names the records service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadType {
    AcademicPerformance,
    Placement,
    EnrollmentDocuments,
}

impl UploadType {
    pub const ALL: [UploadType; 3] = [
        UploadType::AcademicPerformance,
        UploadType::Placement,
        UploadType::EnrollmentDocuments,
    ];

    pub fn pool_kind(self) -> PoolKind {
        match self {
            UploadType::AcademicPerformance => PoolKind::AllStudents,
            UploadType::Placement => PoolKind::PendingPlacement,
            UploadType::EnrollmentDocuments => PoolKind::PendingDocuments,
        }
    }

    /// Segment of `POST /submit/{uploadType}`.
    pub fn path_segment(self) -> &'static str {
        match self {
            UploadType::AcademicPerformance => "academic-performance",
            UploadType::Placement => "placement",
            UploadType::EnrollmentDocuments => "enrollment-documents",
        }
    }

    pub fn slots(self) -> &'static [SlotSpec] {
        match self {
            UploadType::AcademicPerformance => ACADEMIC_SLOTS,
            UploadType::Placement => PLACEMENT_SLOTS,
            UploadType::EnrollmentDocuments => DOCUMENT_SLOTS,
        }
    }

    pub fn answers(self) -> &'static [AnswerSpec] {
        match self {
            UploadType::AcademicPerformance => ACADEMIC_ANSWERS,
            UploadType::Placement => PLACEMENT_ANSWERS,
            UploadType::EnrollmentDocuments => &[],
        }
    }

    pub fn slot(self, name: &str) -> Option<&'static SlotSpec> {
        self.slots().iter().find(|slot| slot.name == name)
    }

    pub fn answer(self, name: &str) -> Option<&'static AnswerSpec> {
        self.answers().iter().find(|answer| answer.name == name)
    }

    pub fn title(self) -> &'static str {
        match self {
            UploadType::AcademicPerformance => "Add Academic Performance Details",
            UploadType::Placement => "Add Placement Details",
            UploadType::EnrollmentDocuments => "Enrollment Details",
        }
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            UploadType::AcademicPerformance => "Academic Performance",
            UploadType::Placement => "Placement",
            UploadType::EnrollmentDocuments => "Enrollment Documents",
        }
    }

    /// Route the client is sent to once a submission has been accepted.
    pub fn confirmation_route(self) -> &'static str {
        match self {
            UploadType::AcademicPerformance => "/academic-performance",
            UploadType::Placement => "/placement-details",
            UploadType::EnrollmentDocuments => "/enrollment-details",
        }
    }

    /// Detail keys rendered ahead of any other field in the confirmation panel.
    pub fn detail_keys(self) -> &'static [&'static str] {
        &["name", "department"]
    }

    pub fn success_text(self) -> &'static str {
        match self {
            UploadType::AcademicPerformance => {
                "Academic performance details uploaded successfully"
            }
            UploadType::Placement => "Placement details uploaded successfully",
            UploadType::EnrollmentDocuments => "Documents uploaded successfully",
        }
    }

    /// Used when a rejected submission carries no server message.
    pub fn failure_text(self) -> &'static str {
        match self {
            UploadType::AcademicPerformance => {
                "Failed to submit academic performance details"
            }
            UploadType::Placement => "Failed to submit details",
            UploadType::EnrollmentDocuments => "Failed to upload documents",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_field_names_match_the_records_service() {
        let fields: Vec<_> = UploadType::EnrollmentDocuments
            .slots()
            .iter()
            .map(|slot| slot.field)
            .collect();
        assert_eq!(fields, ["marks10", "marks12", "registration_form", "gujcet"]);

        assert_eq!(
            UploadType::AcademicPerformance.slot("gradeHistory").map(|s| s.field),
            Some("grade_history")
        );
        assert_eq!(
            UploadType::Placement.answer("status").map(|a| a.field),
            Some("status")
        );
    }

    #[test]
    fn answer_options_are_closed_sets() {
        let status = UploadType::Placement.answer("status").expect("status answer");
        assert!(status.accepts("higher-studies"));
        assert!(!status.accepts("Higher Studies"));

        let appeared = UploadType::AcademicPerformance
            .answer("appearedForExam")
            .expect("exam answer");
        assert!(appeared.accepts("no"));
        assert!(!appeared.accepts(""));
    }

    #[test]
    fn every_flow_has_its_own_pool_and_endpoint() {
        let pools: Vec<_> = UploadType::ALL.iter().map(|t| t.pool_kind()).collect();
        assert_eq!(
            pools,
            [
                PoolKind::AllStudents,
                PoolKind::PendingPlacement,
                PoolKind::PendingDocuments
            ]
        );
        assert_eq!(UploadType::Placement.path_segment(), "placement");
        assert!(UploadType::EnrollmentDocuments.answers().is_empty());
    }
}
