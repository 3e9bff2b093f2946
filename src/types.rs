use serde::Serialize;

/// Heading nesting level. Only two levels qualify for navigation:
/// sections and their immediate subsections. Deeper headings are
/// ignored by every scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    Section,
    Subsection,
}

impl HeadingLevel {
    /// Indentation depth derived from the level. Presentation only.
    #[must_use]
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::Section => 0,
            HeadingLevel::Subsection => 1,
        }
    }

    /// Map a markdown `#` count to a qualifying level.
    #[must_use]
    pub fn from_hashes(count: usize) -> Option<Self> {
        match count {
            1 => Some(HeadingLevel::Section),
            2 => Some(HeadingLevel::Subsection),
            _ => None,
        }
    }

    /// Map an HTML heading tag name (`h1`, `h2`) to a qualifying level.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(HeadingLevel::Section),
            "h2" => Some(HeadingLevel::Subsection),
            _ => None,
        }
    }

    /// The element tag a simulated page uses for this level.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::Section => "h1",
            HeadingLevel::Subsection => "h2",
        }
    }
}

/// A heading found in an article source file. Scanner output; the
/// simulated page builder turns these into element nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedHeading {
    pub level: HeadingLevel,
    /// Display text, verbatim apart from stripped markup.
    pub text: String,
    /// Pre-existing anchor identifier, when the source declares one.
    pub id: Option<String>,
    /// 1-indexed source line. Drives the simulated layout geometry.
    pub line: u32,
}

/// One clickable TOC entry. Mirrors exactly one qualifying heading;
/// created in document order, which is permanent for the page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Anchor identifier of the target heading.
    pub id: String,
    /// Label copied verbatim from the heading text.
    pub label: String,
    /// 0 for sections, 1 for subsections. Indentation only.
    pub depth: u8,
}

/// Per-file heading tally used by batch summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingCounts {
    pub sections: u32,
    pub subsections: u32,
}

impl HeadingCounts {
    #[must_use]
    pub fn total(self) -> u32 {
        self.sections + self.subsections
    }

    pub fn tally(headings: &[ScannedHeading]) -> Self {
        let mut counts = Self::default();
        for h in headings {
            match h.level {
                HeadingLevel::Section => counts.sections += 1,
                HeadingLevel::Subsection => counts.subsections += 1,
            }
        }
        counts
    }
}
