// src/form.rs

/// Job title and description as typed; trimmed on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobContext {
    pub title: String,
    pub description: String,
}

impl JobContext {
    pub fn trimmed_title(&self) -> &str {
        self.title.trim()
    }

    pub fn trimmed_description(&self) -> &str {
        self.description.trim()
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.description)
    }

    /// Both fields non-empty once trimmed. No minimum word count.
    pub fn is_complete(&self) -> bool {
        !self.trimmed_title().is_empty() && !self.trimmed_description().is_empty()
    }
}

/// Number of whitespace-delimited tokens in the trimmed text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn word_count_label(count: usize) -> String {
    format!("{} words", count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  hello   world  "), 2);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("Senior\nRust\tengineer"), 3);
    }

    #[test]
    fn test_is_complete() {
        let mut ctx = JobContext::default();
        assert!(!ctx.is_complete());

        ctx.title = "  Backend Engineer ".to_string();
        assert!(!ctx.is_complete());

        ctx.description = "   ".to_string();
        assert!(!ctx.is_complete());

        ctx.description = "Build services".to_string();
        assert!(ctx.is_complete());
        assert_eq!(ctx.trimmed_title(), "Backend Engineer");
        assert_eq!(ctx.word_count(), 2);
    }
}
