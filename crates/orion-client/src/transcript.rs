use orion_types::Role;
use std::fmt;

/// What a turn carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Text,
    /// `content` is an image URL
    Image,
    /// Stands in for a reply that never arrived
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub kind: TurnKind,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            kind: TurnKind::Text,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            kind: TurnKind::Text,
            content: content.into(),
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            kind: TurnKind::Image,
            content: url.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            kind: TurnKind::Error,
            content: content.into(),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = match self.role {
            Role::User => "You",
            Role::Assistant => "AI",
        };
        match self.kind {
            TurnKind::Image => write!(f, "{}: [image] {}", who, self.content),
            TurnKind::Text | TurnKind::Error => write!(f, "{}: {}", who, self.content),
        }
    }
}

/// Ordered turns of one session. Turns are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}
