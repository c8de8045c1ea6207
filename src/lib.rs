#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod layout_dump;
pub mod member;

pub use config::{Config, TreeConfig, load_config};
pub use layout::{
    EdgeGlyph, EdgeKind, FamilyLayouts, GlyphSize, TreeEdge, TreeLayout, TreeNode,
    compute_family_layouts,
};
pub use layout_dump::{LayoutDump, write_layout_dump};
pub use member::{FamilyMember, MemberError, Region, Relation, parse_members};

#[cfg(feature = "cli")]
pub use cli::run;
