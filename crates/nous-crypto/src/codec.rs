use nous_types::{
    ChatSession, ChatTurn, ChecklistTemplate, DailyChecklist, Note, NoteUpdate, StateRecord,
};

use crate::cipher::{Cipher, CryptoError};

/// Maps the [`Cipher`] over the fixed sensitive-field set of each entity
/// type. Structure and non-sensitive fields are never touched; nested
/// sequences (turns, checklist items) are mapped per item.
#[derive(Debug, Clone)]
pub struct FieldCodec {
    cipher: Cipher,
}

impl FieldCodec {
    pub fn new(cipher: Cipher) -> Self {
        Self { cipher }
    }

    pub fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    // === Notes: title + content ===

    pub fn encrypt_note(&self, mut note: Note) -> Result<Note, CryptoError> {
        note.title = self.cipher.encrypt(&note.title)?;
        note.content = self.cipher.encrypt(&note.content)?;
        Ok(note)
    }

    pub fn decrypt_note(&self, mut note: Note) -> Note {
        note.title = self.cipher.decrypt(&note.title);
        note.content = self.cipher.decrypt(&note.content);
        note
    }

    /// Partial updates only re-encrypt the fields actually present.
    pub fn encrypt_note_update(&self, mut update: NoteUpdate) -> Result<NoteUpdate, CryptoError> {
        if let Some(title) = update.title.take() {
            update.title = Some(self.cipher.encrypt(&title)?);
        }
        if let Some(content) = update.content.take() {
            update.content = Some(self.cipher.encrypt(&content)?);
        }
        Ok(update)
    }

    // === Checklist templates: name + every item ===

    pub fn encrypt_template(
        &self,
        mut template: ChecklistTemplate,
    ) -> Result<ChecklistTemplate, CryptoError> {
        template.name = self.cipher.encrypt(&template.name)?;
        template.items = template
            .items
            .iter()
            .map(|item| self.cipher.encrypt(item))
            .collect::<Result<_, _>>()?;
        Ok(template)
    }

    pub fn decrypt_template(&self, mut template: ChecklistTemplate) -> ChecklistTemplate {
        template.name = self.cipher.decrypt(&template.name);
        template.items = template
            .items
            .iter()
            .map(|item| self.cipher.decrypt(item))
            .collect();
        template
    }

    // === Daily checklists: each item's text ===

    pub fn encrypt_checklist(
        &self,
        mut checklist: DailyChecklist,
    ) -> Result<DailyChecklist, CryptoError> {
        for item in &mut checklist.items {
            item.text = self.cipher.encrypt(&item.text)?;
        }
        Ok(checklist)
    }

    pub fn decrypt_checklist(&self, mut checklist: DailyChecklist) -> DailyChecklist {
        for item in &mut checklist.items {
            item.text = self.cipher.decrypt(&item.text);
        }
        checklist
    }

    // === Chat sessions: title + turn contents + running summary ===

    pub fn encrypt_session(&self, mut session: ChatSession) -> Result<ChatSession, CryptoError> {
        session.title = self.cipher.encrypt(&session.title)?;
        for turn in &mut session.turns {
            turn.content = self.cipher.encrypt(&turn.content)?;
        }
        if let Some(summary) = session.running_summary.take() {
            session.running_summary = Some(self.cipher.encrypt(&summary)?);
        }
        Ok(session)
    }

    pub fn decrypt_session(&self, mut session: ChatSession) -> ChatSession {
        session.title = self.cipher.decrypt(&session.title);
        for turn in &mut session.turns {
            turn.content = self.cipher.decrypt(&turn.content);
        }
        if let Some(summary) = session.running_summary.take() {
            session.running_summary = Some(self.cipher.decrypt(&summary));
        }
        session
    }

    pub fn encrypt_turn(&self, mut turn: ChatTurn) -> Result<ChatTurn, CryptoError> {
        turn.content = self.cipher.encrypt(&turn.content)?;
        Ok(turn)
    }

    // === State records: analysis ===

    pub fn encrypt_state(&self, mut record: StateRecord) -> Result<StateRecord, CryptoError> {
        record.analysis = self.cipher.encrypt(&record.analysis)?;
        Ok(record)
    }

    pub fn decrypt_state(&self, mut record: StateRecord) -> StateRecord {
        record.analysis = self.cipher.decrypt(&record.analysis);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nous_types::{ChecklistItem, StateMetrics};

    fn codec() -> FieldCodec {
        FieldCodec::new(Cipher::new("test-secret"))
    }

    #[test]
    fn note_roundtrip() {
        let codec = codec();
        let note = Note::new("user-1", "Morning", "Slept badly, mood ok");
        let stored = codec.encrypt_note(note.clone()).unwrap();
        assert_ne!(stored.title, note.title);
        assert_ne!(stored.content, note.content);
        assert_eq!(stored.id, note.id);
        assert_eq!(codec.decrypt_note(stored), note);
    }

    #[test]
    fn note_update_only_touches_present_fields() {
        let codec = codec();
        let update = NoteUpdate {
            title: Some("Renamed".to_string()),
            content: None,
        };
        let encrypted = codec.encrypt_note_update(update).unwrap();
        assert!(encrypted.title.is_some());
        assert_ne!(encrypted.title.as_deref(), Some("Renamed"));
        assert!(encrypted.content.is_none());
    }

    #[test]
    fn template_roundtrip() {
        let codec = codec();
        let template = ChecklistTemplate::new(
            "user-1",
            "Evening routine",
            vec!["stretch".to_string(), "read".to_string()],
        );
        let stored = codec.encrypt_template(template.clone()).unwrap();
        assert_ne!(stored.name, template.name);
        assert_ne!(stored.items, template.items);
        assert_eq!(codec.decrypt_template(stored), template);
    }

    #[test]
    fn checklist_roundtrip_keeps_completion_flags() {
        let codec = codec();
        let mut items = vec![ChecklistItem::new("meditate"), ChecklistItem::new("walk")];
        items[1].completed = true;
        let checklist = DailyChecklist::new("user-1", "2024-06-01", items, None);
        let stored = codec.encrypt_checklist(checklist.clone()).unwrap();
        assert_ne!(stored.items[0].text, checklist.items[0].text);
        assert!(stored.items[1].completed);
        assert_eq!(codec.decrypt_checklist(stored), checklist);
    }

    #[test]
    fn session_roundtrip() {
        let codec = codec();
        let mut session = ChatSession::new("user-1", Some("Anxiety check-in".to_string()));
        session.turns.push(ChatTurn::user("I feel on edge today"));
        session.turns.push(ChatTurn::assistant("What set it off?"));
        session.running_summary = Some("User is anxious about work.".to_string());

        let stored = codec.encrypt_session(session.clone()).unwrap();
        assert_ne!(stored.title, session.title);
        assert_ne!(stored.turns[0].content, session.turns[0].content);
        assert_ne!(stored.running_summary, session.running_summary);
        assert_eq!(stored.turns[0].role, session.turns[0].role);
        assert_eq!(codec.decrypt_session(stored), session);
    }

    #[test]
    fn legacy_session_reads_unchanged() {
        let codec = codec();
        let mut session = ChatSession::new("user-1", Some("Old plain session".to_string()));
        session.turns.push(ChatTurn::user("stored before encryption"));
        assert_eq!(codec.decrypt_session(session.clone()), session);
    }

    #[test]
    fn state_roundtrip() {
        let codec = codec();
        let record = StateRecord::new("user-1", StateMetrics::default(), "You sound rested.");
        let stored = codec.encrypt_state(record.clone()).unwrap();
        assert_ne!(stored.analysis, record.analysis);
        assert_eq!(stored.metrics, record.metrics);
        assert_eq!(codec.decrypt_state(stored), record);
    }
}
