/// Хэн бичсэнийг заана: хэрэглэгч эсвэл бот.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Clone, Debug)]
pub struct ChatLine {
    pub role: ChatRole,
    pub text: String,
}

/// Харилцан ярианы цонхонд харагдах зурвасуудын жагсаалт.
///
/// Зөвхөн төгсгөлд нь нэмэгдэнэ; нэмэгдсэн мөр хэзээ ч өөрчлөгдөхгүй.
#[derive(Default)]
pub struct Transcript {
    lines: Vec<ChatLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: ChatRole, text: impl Into<String>) {
        self.lines.push(ChatLine {
            role,
            text: text.into(),
        });
    }

    pub fn lines(&self) -> &[ChatLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_in_call_order() {
        let mut transcript = Transcript::new();
        transcript.push(ChatRole::User, "Сайн уу");
        transcript.push(ChatRole::Bot, "Сайн байна уу!");
        transcript.push(ChatRole::Bot, "");

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.lines()[0].role, ChatRole::User);
        assert_eq!(transcript.lines()[0].text, "Сайн уу");
        assert_eq!(transcript.lines()[1].role, ChatRole::Bot);
        assert_eq!(transcript.lines()[2].text, "");
    }

    #[test]
    fn earlier_lines_survive_later_pushes() {
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.push(ChatRole::Bot, format!("мөр-{i}"));
        }

        assert_eq!(transcript.len(), 10);
        for (i, line) in transcript.lines().iter().enumerate() {
            assert_eq!(line.text, format!("мөр-{i}"));
        }
    }

    #[test]
    fn clear_empties_the_view() {
        let mut transcript = Transcript::new();
        transcript.push(ChatRole::User, "асуулт");
        transcript.clear();

        assert!(transcript.is_empty());
    }
}
