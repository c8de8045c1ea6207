use super::*;

pub(super) struct TreeContext<'a> {
    pub members: &'a [FamilyMember],
    pub children: HashMap<&'a str, Vec<usize>>,
    pub config: &'a TreeConfig,
}

#[derive(Debug)]
pub(super) struct LayoutUnit {
    pub main: usize,
    pub partners: Vec<usize>,
    pub own_width: f32,
    pub children_width: f32,
    pub subtree_width: f32,
    pub children: Vec<LayoutUnit>,
}

pub(super) fn build_tree_context<'a>(
    members: &'a [FamilyMember],
    config: &'a TreeConfig,
) -> TreeContext<'a> {
    let self_id = members
        .iter()
        .find(|m| m.relation == Relation::Oneself)
        .map(|m| m.id.as_str());

    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, member) in members.iter().enumerate() {
        if member.relation.level() <= 0 || member.relation.is_in_law() {
            continue;
        }
        // A first-generation child without an explicit parent reference is
        // assumed to hang off self; older data predates the parentId field.
        let parent_id = member.parent_id.as_deref().or_else(|| {
            if member.relation.level() == 1 {
                self_id
            } else {
                None
            }
        });
        let Some(parent_id) = parent_id else {
            continue;
        };
        children.entry(parent_id).or_default().push(idx);
    }

    TreeContext {
        members,
        children,
        config,
    }
}

/// Post-order measure of one member plus co-located partners and all
/// descendant units. `visited` doubles as the cycle guard: a repeat visit
/// measures as a bare unit instead of recursing again.
pub(super) fn measure_subtree(
    member_idx: usize,
    ctx: &TreeContext,
    visited: &mut HashSet<usize>,
) -> LayoutUnit {
    let member = &ctx.members[member_idx];
    let first_visit = visited.insert(member_idx);

    let mut partners: Vec<usize> = ctx
        .members
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.partner_id.as_deref() == Some(member.id.as_str()))
        .map(|(idx, _)| idx)
        .collect();
    if member.relation == Relation::Oneself {
        // The spouse co-locates with self even without a partnerId link.
        for (idx, candidate) in ctx.members.iter().enumerate() {
            if candidate.relation == Relation::Spouse && !partners.contains(&idx) {
                partners.push(idx);
            }
        }
    }

    let partner_count = partners.len() as f32;
    let own_width =
        (1.0 + partner_count) * ctx.config.node_width + partner_count * ctx.config.partner_gap;

    let child_indices = if first_visit {
        unit_children(member_idx, &partners, ctx)
    } else {
        Vec::new()
    };

    let mut children = Vec::new();
    let mut children_width = 0.0;
    for (i, child_idx) in child_indices.iter().enumerate() {
        let child = measure_subtree(*child_idx, ctx, visited);
        if i > 0 {
            children_width += ctx.config.sibling_gap;
        }
        children_width += child.subtree_width;
        children.push(child);
    }

    let subtree_width = own_width.max(children_width);
    LayoutUnit {
        main: member_idx,
        partners,
        own_width,
        children_width,
        subtree_width,
        children,
    }
}

// Children of the unit's main member, then of each partner in turn, each
// child kept once in first-seen order.
fn unit_children(member_idx: usize, partners: &[usize], ctx: &TreeContext) -> Vec<usize> {
    let mut parent_ids = vec![ctx.members[member_idx].id.as_str()];
    for partner_idx in partners {
        parent_ids.push(ctx.members[*partner_idx].id.as_str());
    }

    let mut seen = HashSet::new();
    let mut children = Vec::new();
    for parent_id in parent_ids {
        let Some(indices) = ctx.children.get(parent_id) else {
            continue;
        };
        for child_idx in indices {
            if seen.insert(ctx.members[*child_idx].id.as_str()) {
                children.push(*child_idx);
            }
        }
    }
    children
}

fn place_subtree(
    unit: &LayoutUnit,
    x: f32,
    y: f32,
    ctx: &TreeContext,
    nodes: &mut Vec<TreeNode>,
    edges: &mut Vec<TreeEdge>,
) {
    let config = ctx.config;
    let center_x = x + unit.subtree_width / 2.0;
    let start_x = center_x - unit.own_width / 2.0;

    let main = &ctx.members[unit.main];
    nodes.push(TreeNode {
        member: main.clone(),
        x: start_x,
        y,
        ghost: false,
    });

    let main_right = start_x + config.node_width;
    for (i, partner_idx) in unit.partners.iter().enumerate() {
        let partner = &ctx.members[*partner_idx];
        let partner_x = start_x + (i as f32 + 1.0) * (config.node_width + config.partner_gap);
        nodes.push(TreeNode {
            member: partner.clone(),
            x: partner_x,
            y,
            ghost: false,
        });
        edges.push(TreeEdge {
            id: format!("e-c-{}-{}", main.id, partner.id),
            x1: main_right,
            y1: y + config.node_height / 2.0,
            x2: partner_x,
            y2: y + config.node_height / 2.0,
            kind: EdgeKind::Solid,
            glyph: Some(EdgeGlyph::Heart),
            glyph_size: Some(GlyphSize::Small),
        });
    }

    if unit.children.is_empty() {
        return;
    }

    let source = if unit.partners.is_empty() {
        (start_x + config.node_width / 2.0, y + config.node_height)
    } else {
        let first_partner_x = start_x + config.node_width + config.partner_gap;
        (
            (start_x + config.node_width + first_partner_x) / 2.0,
            y + config.node_height / 2.0,
        )
    };
    place_children(
        &unit.children,
        unit.children_width,
        center_x,
        y,
        source,
        &main.id,
        ctx,
        nodes,
        edges,
    );
}

/// Pre-order placement of a measured children band: the band is centered on
/// `band_center_x`, one row below `parent_y`, with a step-edge bus joining
/// the parent's drop line to each child's stub.
#[allow(clippy::too_many_arguments)]
pub(super) fn place_children(
    children: &[LayoutUnit],
    children_width: f32,
    band_center_x: f32,
    parent_y: f32,
    source: (f32, f32),
    parent_id: &str,
    ctx: &TreeContext,
    nodes: &mut Vec<TreeNode>,
    edges: &mut Vec<TreeEdge>,
) {
    if children.is_empty() {
        return;
    }
    let config = ctx.config;
    let next_y = parent_y + config.level_height;
    let mid_y = parent_y + config.node_height + (config.level_height - config.node_height) / 2.0;

    edges.push(TreeEdge {
        id: format!("e-down-{parent_id}"),
        x1: source.0,
        y1: source.1,
        x2: source.0,
        y2: mid_y,
        kind: EdgeKind::Step,
        glyph: None,
        glyph_size: None,
    });

    let mut min_child_x = f32::MAX;
    let mut max_child_x = f32::MIN;
    let mut cursor = band_center_x - children_width / 2.0;
    for child in children {
        let child_center_x = cursor + child.subtree_width / 2.0;
        place_subtree(child, cursor, next_y, ctx, nodes, edges);

        let child_main_x = child_center_x - child.own_width / 2.0 + config.node_width / 2.0;
        edges.push(TreeEdge {
            id: format!("e-up-{}", ctx.members[child.main].id),
            x1: child_main_x,
            y1: mid_y,
            x2: child_main_x,
            y2: next_y,
            kind: EdgeKind::Step,
            glyph: None,
            glyph_size: None,
        });

        min_child_x = min_child_x.min(child_main_x);
        max_child_x = max_child_x.max(child_main_x);
        cursor += child.subtree_width + config.sibling_gap;
    }

    // A single child gets only its stub; the bar would be a point.
    if children.len() >= 2 {
        edges.push(TreeEdge {
            id: format!("e-bar-{parent_id}"),
            x1: min_child_x,
            y1: mid_y,
            x2: max_child_x,
            y2: mid_y,
            kind: EdgeKind::Step,
            glyph: None,
            glyph_size: None,
        });
    }
}
