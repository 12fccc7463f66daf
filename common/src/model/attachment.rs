use std::collections::BTreeMap;

use crate::model::upload::UploadType;

/// A file chosen for a slot. `H` is the platform handle to the bytes: a
/// browser `File` in the client, anything cheap to clone in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment<H> {
    pub file_name: String,
    /// Declared MIME type; `None` when the platform reported none.
    pub mime_type: Option<String>,
    pub handle: H,
}

impl<H> Attachment<H> {
    pub fn new(file_name: impl Into<String>, mime_type: Option<String>, handle: H) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.filter(|mime| !mime.trim().is_empty()),
            handle,
        }
    }

    /// Lower-cased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Ordered slots of an upload type, each holding at most one file.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentSet<H> {
    upload_type: UploadType,
    slots: Vec<(&'static str, Option<Attachment<H>>)>,
}

impl<H> AttachmentSet<H> {
    pub fn new(upload_type: UploadType) -> Self {
        Self {
            upload_type,
            slots: upload_type.slots().iter().map(|slot| (slot.name, None)).collect(),
        }
    }

    pub fn upload_type(&self) -> UploadType {
        self.upload_type
    }

    /// Puts `attachment` in `slot`, returning the file it replaced. `Err` hands
    /// the attachment back when the upload type has no such slot.
    pub fn put(
        &mut self,
        slot: &str,
        attachment: Attachment<H>,
    ) -> Result<Option<Attachment<H>>, Attachment<H>> {
        match self.slots.iter_mut().find(|(name, _)| *name == slot) {
            Some((_, held)) => Ok(held.replace(attachment)),
            None => Err(attachment),
        }
    }

    pub fn take(&mut self, slot: &str) -> Option<Attachment<H>> {
        self.slots
            .iter_mut()
            .find(|(name, _)| *name == slot)
            .and_then(|(_, held)| held.take())
    }

    pub fn get(&self, slot: &str) -> Option<&Attachment<H>> {
        self.slots
            .iter()
            .find(|(name, _)| *name == slot)
            .and_then(|(_, held)| held.as_ref())
    }

    /// Slots in declaration order with their current content.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&Attachment<H>>)> {
        self.slots.iter().map(|(name, held)| (*name, held.as_ref()))
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|(_, held)| held.is_some()).count()
    }

    pub fn clear(&mut self) {
        for (_, held) in &mut self.slots {
            *held = None;
        }
    }
}

/// Ancillary scalar answers keyed by answer name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    values: BTreeMap<String, String>,
}

impl AnswerSet {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let name = name.into();
        if value.is_empty() {
            self.values.remove(&name);
        } else {
            self.values.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> Attachment<()> {
        Attachment::new(name, None, ())
    }

    #[test]
    fn reattaching_replaces_the_previous_file() {
        let mut set = AttachmentSet::new(UploadType::Placement);
        assert_eq!(set.put("proof", file("offer.pdf")), Ok(None));

        let replaced = set.put("proof", file("offer-v2.pdf")).expect("known slot");
        assert_eq!(replaced.map(|a| a.file_name), Some("offer.pdf".to_string()));
        assert_eq!(set.get("proof").map(|a| a.file_name.as_str()), Some("offer-v2.pdf"));
        assert_eq!(set.filled(), 1);
    }

    #[test]
    fn unknown_slots_are_refused() {
        let mut set = AttachmentSet::new(UploadType::Placement);
        assert!(set.put("tenthMarksheet", file("10th.pdf")).is_err());
        assert_eq!(set.filled(), 0);
    }

    #[test]
    fn slots_follow_declaration_order() {
        let mut set = AttachmentSet::new(UploadType::EnrollmentDocuments);
        set.put("gujcetResult", file("gujcet.png")).expect("known slot");
        let names: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            ["tenthMarksheet", "twelfthMarksheet", "registrationForm", "gujcetResult"]
        );
        set.clear();
        assert_eq!(set.filled(), 0);
    }

    #[test]
    fn extension_is_case_insensitive_and_needs_a_stem() {
        assert_eq!(file("Scan.JPEG").extension(), Some("jpeg".into()));
        assert_eq!(file("archive.tar.PDF").extension(), Some("pdf".into()));
        assert_eq!(file("README").extension(), None);
        assert_eq!(file(".png").extension(), None);
    }

    #[test]
    fn empty_answer_unsets_it() {
        let mut answers = AnswerSet::default();
        answers.set("status", "placement");
        assert_eq!(answers.get("status"), Some("placement"));
        answers.set("status", "");
        assert_eq!(answers.get("status"), None);
    }
}
