use crate::member::FamilyMember;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub member: FamilyMember,
    pub x: f32,
    pub y: f32,
    /// Ghost nodes restate a person that is already placed elsewhere, e.g.
    /// the anchor clone heading a past-relationship sub-graph.
    pub ghost: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Solid,
    Dashed,
    /// Orthogonal connector; consumers draw it as vertical, horizontal at
    /// the midpoint between y1 and y2, then vertical again.
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeGlyph {
    Heart,
    BrokenHeart,
    /// Reserved in the wire vocabulary; nothing emits it today.
    Star,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSize {
    Small,
    Large,
}

#[derive(Debug, Clone)]
pub struct TreeEdge {
    pub id: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub kind: EdgeKind,
    pub glyph: Option<EdgeGlyph>,
    pub glyph_size: Option<GlyphSize>,
}

#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct FamilyLayouts {
    pub main: TreeLayout,
    pub self_past: Option<TreeLayout>,
    pub spouse_past: Option<TreeLayout>,
}
