//! Seven-segment character table
//!
//! Segment order follows the usual datasheet naming:
//!
//! ```text
//!  aaa
//! f   b
//!  ggg
//! e   c
//!  ddd
//! ```

/// Number of segments in a single character cell
pub const SEGMENT_COUNT: usize = 7;

const SEGMENT_MASK: u8 = 0x7F;

/// One bar of a seven-segment character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Segment {
    /// Top
    A = 0,
    /// Top right
    B = 1,
    /// Bottom right
    C = 2,
    /// Bottom
    D = 3,
    /// Bottom left
    E = 4,
    /// Top left
    F = 5,
    /// Middle
    G = 6,
}

impl Segment {
    /// All segments in display order
    pub const ALL: [Self; SEGMENT_COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of lit segments, one bit per [`Segment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segments(u8);

impl Segments {
    /// No segment lit
    pub const BLANK: Self = Self(0);
    /// Every segment lit
    pub const ALL: Self = Self(SEGMENT_MASK);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & SEGMENT_MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from an `[a, b, c, d, e, f, g]` tuple
    pub const fn from_array(segments: [bool; SEGMENT_COUNT]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < SEGMENT_COUNT {
            if segments[i] {
                bits |= 1 << i;
            }
            i += 1;
        }
        Self(bits)
    }

    /// Expand into an `[a, b, c, d, e, f, g]` tuple
    pub const fn to_array(self) -> [bool; SEGMENT_COUNT] {
        let mut segments = [false; SEGMENT_COUNT];
        let mut i = 0;
        while i < SEGMENT_COUNT {
            segments[i] = self.0 & (1 << i) != 0;
            i += 1;
        }
        segments
    }

    pub const fn is_on(self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    pub const fn count_on(self) -> u32 {
        self.0.count_ones()
    }

    /// Keep only the segments whose index is below `count`
    #[allow(clippy::cast_possible_truncation)]
    pub const fn first(self, count: usize) -> Self {
        if count >= SEGMENT_COUNT {
            return self;
        }
        let mask = (1u8 << count as u8) - 1;
        Self(self.0 & mask)
    }

    /// Blank the pattern unless `visible` is set
    pub const fn masked(self, visible: bool) -> Self {
        if visible { self } else { Self::BLANK }
    }

    /// Take the first `count` segments from `self` and the rest from `other`
    pub const fn splice(self, other: Self, count: usize) -> Self {
        let head = self.first(count);
        let tail = Self(other.0 & !Self::ALL.first(count).0);
        Self(head.0 | tail.0)
    }
}

const fn pattern(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8) -> Segments {
    Segments(a | (b << 1) | (c << 2) | (d << 3) | (e << 4) | (f << 5) | (g << 6))
}

/// Every character the display knows how to draw
///
/// Letters the seven-segment form cannot express unambiguously (K, M, Q, V,
/// W, X, Z) are left out and render blank.
pub const SEGMENT_MAP: [(char, Segments); 31] = [
    ('A', pattern(1, 1, 1, 0, 1, 1, 1)),
    ('B', pattern(1, 1, 1, 1, 1, 1, 1)),
    ('C', pattern(1, 0, 0, 1, 1, 1, 0)),
    ('D', pattern(0, 1, 1, 1, 1, 0, 1)),
    ('E', pattern(1, 0, 0, 1, 1, 1, 1)),
    ('F', pattern(1, 0, 0, 0, 1, 1, 1)),
    ('G', pattern(1, 0, 1, 1, 1, 1, 0)),
    ('H', pattern(0, 1, 1, 0, 1, 1, 1)),
    ('I', pattern(0, 0, 0, 0, 1, 1, 0)),
    ('J', pattern(0, 1, 1, 1, 0, 0, 0)),
    ('L', pattern(0, 0, 0, 1, 1, 1, 0)),
    ('N', pattern(0, 1, 1, 0, 1, 1, 0)),
    ('O', pattern(1, 1, 1, 1, 1, 1, 0)),
    ('P', pattern(1, 1, 0, 0, 1, 1, 1)),
    ('R', pattern(0, 0, 0, 0, 1, 0, 1)),
    ('S', pattern(1, 0, 1, 1, 0, 1, 1)),
    ('T', pattern(0, 0, 0, 1, 1, 1, 1)),
    ('U', pattern(0, 1, 1, 1, 1, 1, 0)),
    ('Y', pattern(0, 1, 1, 1, 0, 1, 1)),
    ('0', pattern(1, 1, 1, 1, 1, 1, 0)),
    ('1', pattern(0, 1, 1, 0, 0, 0, 0)),
    ('2', pattern(1, 1, 0, 1, 1, 0, 1)),
    ('3', pattern(1, 1, 1, 1, 0, 0, 1)),
    ('4', pattern(0, 1, 1, 0, 0, 1, 1)),
    ('5', pattern(1, 0, 1, 1, 0, 1, 1)),
    ('6', pattern(1, 0, 1, 1, 1, 1, 1)),
    ('7', pattern(1, 1, 1, 0, 0, 0, 0)),
    ('8', pattern(1, 1, 1, 1, 1, 1, 1)),
    ('9', pattern(1, 1, 1, 1, 0, 1, 1)),
    (' ', pattern(0, 0, 0, 0, 0, 0, 0)),
    ('-', pattern(0, 0, 0, 0, 0, 0, 1)),
];

/// Look up the segment pattern of a character
///
/// Lowercase letters share the uppercase glyph. Anything not in
/// [`SEGMENT_MAP`] renders blank.
pub fn lookup(ch: char) -> Segments {
    let ch = ch.to_ascii_uppercase();
    SEGMENT_MAP
        .iter()
        .find(|(mapped, _)| *mapped == ch)
        .map_or(Segments::BLANK, |(_, segments)| *segments)
}

/// Check whether a character has its own entry in [`SEGMENT_MAP`]
pub fn is_mapped(ch: char) -> bool {
    let ch = ch.to_ascii_uppercase();
    SEGMENT_MAP.iter().any(|(mapped, _)| *mapped == ch)
}
