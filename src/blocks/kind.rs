//! Block type discriminators
//!
//! The `type` string of a block is classified once into `BlockType`.
//! Supported kinds form a closed enum, so every kind has exactly one rule in
//! `validate_block` and the compiler checks the dispatch is exhaustive.

use std::fmt;

/// Block kinds the renderer supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Html,
    Code,
    LessonPlan,
    ContentBlock,
    Videos,
    VideosBlock,
    Checklist,
    Bibliography,
    BibliographyBlock,
    CardGrid,
    Callout,
    Timeline,
    FlightPlan,
    Accordion,
    Representations,
    TruthTable,
    Audio,
    AudioBlock,
    Md3Table,
    Component,
    LegacySection,
}

impl BlockKind {
    /// Every supported kind, in registry order
    pub const ALL: [BlockKind; 21] = [
        BlockKind::Html,
        BlockKind::Code,
        BlockKind::LessonPlan,
        BlockKind::ContentBlock,
        BlockKind::Videos,
        BlockKind::VideosBlock,
        BlockKind::Checklist,
        BlockKind::Bibliography,
        BlockKind::BibliographyBlock,
        BlockKind::CardGrid,
        BlockKind::Callout,
        BlockKind::Timeline,
        BlockKind::FlightPlan,
        BlockKind::Accordion,
        BlockKind::Representations,
        BlockKind::TruthTable,
        BlockKind::Audio,
        BlockKind::AudioBlock,
        BlockKind::Md3Table,
        BlockKind::Component,
        BlockKind::LegacySection,
    ];

    /// The `type` string as written in lesson JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Html => "html",
            BlockKind::Code => "code",
            BlockKind::LessonPlan => "lessonPlan",
            BlockKind::ContentBlock => "contentBlock",
            BlockKind::Videos => "videos",
            BlockKind::VideosBlock => "videosBlock",
            BlockKind::Checklist => "checklist",
            BlockKind::Bibliography => "bibliography",
            BlockKind::BibliographyBlock => "bibliographyBlock",
            BlockKind::CardGrid => "cardGrid",
            BlockKind::Callout => "callout",
            BlockKind::Timeline => "timeline",
            BlockKind::FlightPlan => "flightPlan",
            BlockKind::Accordion => "accordion",
            BlockKind::Representations => "representations",
            BlockKind::TruthTable => "truthTable",
            BlockKind::Audio => "audio",
            BlockKind::AudioBlock => "audioBlock",
            BlockKind::Md3Table => "md3Table",
            BlockKind::Component => "component",
            BlockKind::LegacySection => "legacySection",
        }
    }

    /// Case-sensitive lookup
    pub fn parse(type_name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == type_name)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Block kinds still tolerated but awaiting migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyKind {
    DragAndDrop,
    FileTree,
    Quiz,
}

impl LegacyKind {
    pub const ALL: [LegacyKind; 3] = [LegacyKind::DragAndDrop, LegacyKind::FileTree, LegacyKind::Quiz];

    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyKind::DragAndDrop => "dragAndDrop",
            LegacyKind::FileTree => "fileTree",
            LegacyKind::Quiz => "quiz",
        }
    }

    pub fn parse(type_name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == type_name)
    }
}

/// Classification of a block's `type` string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType<'a> {
    Supported(BlockKind),
    Legacy(LegacyKind),
    Unknown(&'a str),
}

impl<'a> BlockType<'a> {
    pub fn classify(type_name: &'a str) -> Self {
        if let Some(legacy) = LegacyKind::parse(type_name) {
            return BlockType::Legacy(legacy);
        }
        match BlockKind::parse(type_name) {
            Some(kind) => BlockType::Supported(kind),
            None => BlockType::Unknown(type_name),
        }
    }
}

/// Components a `component` block may reference
pub const SUPPORTED_COMPONENTS: &[&str] = &[
    "Md3Table",
    "Md3LogicOperators",
    "MemoryDiagram",
    "OrderedList",
    "CardGrid",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_round_trips_through_its_name() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(BlockKind::parse("cardGrid"), Some(BlockKind::CardGrid));
        assert_eq!(BlockKind::parse("CardGrid"), None);
        assert_eq!(BlockKind::parse("cardgrid"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(BlockType::classify("quiz"), BlockType::Legacy(LegacyKind::Quiz));
        assert_eq!(BlockType::classify("callout"), BlockType::Supported(BlockKind::Callout));
        assert_eq!(BlockType::classify("flashcards"), BlockType::Unknown("flashcards"));
    }
}
