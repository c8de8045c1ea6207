use super::*;

/// Lay out one dissolved relationship as a free-standing graph: the ghosted
/// anchor and the ex-partner side by side, their children on a single row
/// below. Returns `None` unless both the anchor clone and an ex-partner are
/// present.
pub(super) fn compute_past_layout(
    members: &[FamilyMember],
    anchor: Relation,
    edge_tag: &str,
    config: &TreeConfig,
) -> Option<TreeLayout> {
    let root = members.iter().find(|m| m.relation == anchor)?;
    let ex_partner = members.iter().find(|m| m.relation.is_former_union())?;

    let mut nodes: Vec<TreeNode> = Vec::new();
    let mut edges: Vec<TreeEdge> = Vec::new();

    nodes.push(TreeNode {
        member: root.clone(),
        x: 0.0,
        y: 0.0,
        ghost: true,
    });
    let ex_x = config.node_width + config.past_union_gap;
    nodes.push(TreeNode {
        member: ex_partner.clone(),
        x: ex_x,
        y: 0.0,
        ghost: false,
    });
    edges.push(TreeEdge {
        id: format!("e-{edge_tag}"),
        x1: config.node_width,
        y1: config.node_height / 2.0,
        x2: ex_x,
        y2: config.node_height / 2.0,
        kind: EdgeKind::Dashed,
        glyph: Some(EdgeGlyph::BrokenHeart),
        glyph_size: Some(GlyphSize::Small),
    });

    let children: Vec<&FamilyMember> = members
        .iter()
        .filter(|m| m.relation.level() > 0)
        .collect();
    if !children.is_empty() {
        let union_center_x = (config.node_width + ex_x) / 2.0;
        let total_width = children.len() as f32 * config.node_width
            + (children.len() - 1) as f32 * config.sibling_gap;
        let row_y = config.level_height;
        let start_x = union_center_x - total_width / 2.0;

        let mut cursor = start_x;
        for child in &children {
            nodes.push(TreeNode {
                member: (*child).clone(),
                x: cursor,
                y: row_y,
                ghost: false,
            });
            edges.push(TreeEdge {
                id: format!("e-{}", child.id),
                x1: union_center_x,
                y1: config.node_height / 2.0 + config.past_drop_offset,
                x2: cursor + config.node_width / 2.0,
                y2: row_y,
                kind: EdgeKind::Step,
                glyph: None,
                glyph_size: None,
            });
            cursor += config.node_width + config.sibling_gap;
        }

        // A wide child row can spill past the left edge; slide the whole
        // graph back into view.
        if start_x < 0.0 {
            let shift = -start_x;
            for node in nodes.iter_mut() {
                node.x += shift;
            }
            for edge in edges.iter_mut() {
                edge.x1 += shift;
                edge.x2 += shift;
            }
        }
    }

    let mut width: f32 = 0.0;
    let mut height: f32 = 0.0;
    for node in &nodes {
        width = width.max(node.x + config.node_width);
        height = height.max(node.y + config.node_height);
    }

    Some(TreeLayout {
        nodes,
        edges,
        width,
        height,
    })
}
