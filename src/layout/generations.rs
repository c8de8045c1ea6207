use super::*;

struct MainGroups<'a> {
    oneself: Option<&'a FamilyMember>,
    spouse: Option<&'a FamilyMember>,
    self_siblings: Vec<&'a FamilyMember>,
    spouse_siblings: Vec<&'a FamilyMember>,
    father: Option<&'a FamilyMember>,
    mother: Option<&'a FamilyMember>,
    father_in_law: Option<&'a FamilyMember>,
    mother_in_law: Option<&'a FamilyMember>,
    paternal_grandfather: Option<&'a FamilyMember>,
    paternal_grandmother: Option<&'a FamilyMember>,
    maternal_grandfather: Option<&'a FamilyMember>,
    maternal_grandmother: Option<&'a FamilyMember>,
    spouse_paternal_grandfather: Option<&'a FamilyMember>,
    spouse_paternal_grandmother: Option<&'a FamilyMember>,
    spouse_maternal_grandfather: Option<&'a FamilyMember>,
    spouse_maternal_grandmother: Option<&'a FamilyMember>,
}

fn find_groups(members: &[FamilyMember]) -> MainGroups<'_> {
    let find = |relation: Relation| members.iter().find(|m| m.relation == relation);
    // The generic grandparent roles predate the paternal/maternal split and
    // stand in for the paternal side.
    let find_either =
        |a: Relation, b: Relation| members.iter().find(|m| m.relation == a || m.relation == b);

    MainGroups {
        oneself: find(Relation::Oneself),
        spouse: find(Relation::Spouse),
        self_siblings: members
            .iter()
            .filter(|m| matches!(m.relation, Relation::Brother | Relation::Sister))
            .collect(),
        spouse_siblings: members
            .iter()
            .filter(|m| matches!(m.relation, Relation::BrotherInLaw | Relation::SisterInLaw))
            .collect(),
        father: find(Relation::Father),
        mother: find(Relation::Mother),
        father_in_law: find(Relation::FatherInLaw),
        mother_in_law: find(Relation::MotherInLaw),
        paternal_grandfather: find_either(Relation::PaternalGrandfather, Relation::Grandfather),
        paternal_grandmother: find_either(Relation::PaternalGrandmother, Relation::Grandmother),
        maternal_grandfather: find(Relation::MaternalGrandfather),
        maternal_grandmother: find(Relation::MaternalGrandmother),
        spouse_paternal_grandfather: find_either(
            Relation::SpousePaternalGrandfather,
            Relation::SpouseGrandfather,
        ),
        spouse_paternal_grandmother: find_either(
            Relation::SpousePaternalGrandmother,
            Relation::SpouseGrandmother,
        ),
        spouse_maternal_grandfather: find(Relation::SpouseMaternalGrandfather),
        spouse_maternal_grandmother: find(Relation::SpouseMaternalGrandmother),
    }
}

struct BandGaps {
    parents_gap: f32,
    in_laws_gap: f32,
    couple_gap: f32,
}

// Every gap reserves the horizontal bulk hanging above its neighbors: a
// parent couple must clear both grandparent pairs, and the anchor couple
// must clear both parent subtrees.
fn band_gaps(groups: &MainGroups, config: &TreeConfig) -> BandGaps {
    let half_node = config.node_width / 2.0;
    let reserve = |grandparents_present: bool| {
        if grandparents_present {
            config.ancestor_pair_half_width
        } else {
            half_node
        }
    };

    let has_paternal_gp =
        groups.paternal_grandfather.is_some() || groups.paternal_grandmother.is_some();
    let has_maternal_gp =
        groups.maternal_grandfather.is_some() || groups.maternal_grandmother.is_some();
    let has_spouse_paternal_gp = groups.spouse_paternal_grandfather.is_some()
        || groups.spouse_paternal_grandmother.is_some();
    let has_spouse_maternal_gp = groups.spouse_maternal_grandfather.is_some()
        || groups.spouse_maternal_grandmother.is_some();

    let required_parents_dist =
        reserve(has_paternal_gp) + reserve(has_maternal_gp) + config.sibling_gap;
    let parents_gap = config
        .sibling_gap
        .max(required_parents_dist - config.node_width);

    let required_in_laws_dist =
        reserve(has_spouse_paternal_gp) + reserve(has_spouse_maternal_gp) + config.sibling_gap;
    let in_laws_gap = config
        .sibling_gap
        .max(required_in_laws_dist - config.node_width);

    let self_right_bound = if groups.father.is_some() || groups.mother.is_some() {
        (config.node_width + parents_gap) / 2.0 + reserve(has_maternal_gp)
    } else {
        half_node
    };
    let spouse_left_bound = if groups.father_in_law.is_some() || groups.mother_in_law.is_some() {
        (config.node_width + in_laws_gap) / 2.0 + reserve(has_spouse_paternal_gp)
    } else {
        half_node
    };
    let couple_gap = config
        .sibling_gap
        .max(self_right_bound + spouse_left_bound + config.sibling_gap - config.node_width);

    BandGaps {
        parents_gap,
        in_laws_gap,
        couple_gap,
    }
}

#[derive(Default)]
struct CoupleNodes {
    left: Option<usize>,
    right: Option<usize>,
    center_x: Option<f32>,
}

fn place_couple_above(
    left: Option<&FamilyMember>,
    right: Option<&FamilyMember>,
    target_center_x: f32,
    y: f32,
    gap: f32,
    config: &TreeConfig,
    nodes: &mut Vec<TreeNode>,
    edges: &mut Vec<TreeEdge>,
) -> CoupleNodes {
    match (left, right) {
        (Some(first), Some(second)) => {
            let pair_width = config.node_width * 2.0 + gap;
            let start = target_center_x - pair_width / 2.0;
            let second_x = start + config.node_width + gap;
            nodes.push(TreeNode {
                member: first.clone(),
                x: start,
                y,
                ghost: false,
            });
            let left_idx = nodes.len() - 1;
            nodes.push(TreeNode {
                member: second.clone(),
                x: second_x,
                y,
                ghost: false,
            });
            let right_idx = nodes.len() - 1;
            edges.push(TreeEdge {
                id: format!("e-{}-{}", first.id, second.id),
                x1: start + config.node_width,
                y1: y + config.node_height / 2.0,
                x2: second_x,
                y2: y + config.node_height / 2.0,
                kind: EdgeKind::Solid,
                glyph: Some(EdgeGlyph::Heart),
                glyph_size: Some(GlyphSize::Small),
            });
            CoupleNodes {
                left: Some(left_idx),
                right: Some(right_idx),
                center_x: Some((start + config.node_width + second_x) / 2.0),
            }
        }
        (Some(only), None) => {
            let x = target_center_x - config.node_width / 2.0;
            nodes.push(TreeNode {
                member: only.clone(),
                x,
                y,
                ghost: false,
            });
            CoupleNodes {
                left: Some(nodes.len() - 1),
                right: None,
                center_x: Some(x + config.node_width / 2.0),
            }
        }
        (None, Some(only)) => {
            let x = target_center_x - config.node_width / 2.0;
            nodes.push(TreeNode {
                member: only.clone(),
                x,
                y,
                ghost: false,
            });
            CoupleNodes {
                left: None,
                right: Some(nodes.len() - 1),
                center_x: Some(x + config.node_width / 2.0),
            }
        }
        (None, None) => CoupleNodes::default(),
    }
}

pub(super) fn compute_main_layout(members: &[FamilyMember], config: &TreeConfig) -> TreeLayout {
    let mut nodes: Vec<TreeNode> = Vec::new();
    let mut edges: Vec<TreeEdge> = Vec::new();

    let groups = find_groups(members);
    let gaps = band_gaps(&groups, config);

    let level0_y = config.row_y(0);
    let mut cursor = config.row_origin_x;

    let mut self_sib_nodes: Vec<usize> = Vec::new();
    for sibling in &groups.self_siblings {
        nodes.push(TreeNode {
            member: (*sibling).clone(),
            x: cursor,
            y: level0_y,
            ghost: false,
        });
        self_sib_nodes.push(nodes.len() - 1);
        cursor += config.node_width + config.sibling_gap;
    }
    if !groups.self_siblings.is_empty() {
        cursor += config.sibling_run_gap;
    }

    let mut self_node: Option<usize> = None;
    if let Some(member) = groups.oneself {
        nodes.push(TreeNode {
            member: member.clone(),
            x: cursor,
            y: level0_y,
            ghost: false,
        });
        self_node = Some(nodes.len() - 1);
        cursor += config.node_width;
    }

    let mut spouse_node: Option<usize> = None;
    if let Some(member) = groups.spouse {
        cursor += gaps.couple_gap;
        nodes.push(TreeNode {
            member: member.clone(),
            x: cursor,
            y: level0_y,
            ghost: false,
        });
        spouse_node = Some(nodes.len() - 1);
        cursor += config.node_width + config.sibling_gap;
    } else {
        cursor += config.sibling_gap;
    }

    let mut spouse_sib_nodes: Vec<usize> = Vec::new();
    if !groups.spouse_siblings.is_empty() {
        cursor += config.sibling_run_gap;
    }
    for sibling in &groups.spouse_siblings {
        nodes.push(TreeNode {
            member: (*sibling).clone(),
            x: cursor,
            y: level0_y,
            ghost: false,
        });
        spouse_sib_nodes.push(nodes.len() - 1);
        cursor += config.node_width + config.sibling_gap;
    }

    let level0_width = cursor;

    // Ancestor band: parent couples center above their anchor, grandparent
    // couples above whichever parent node actually got placed.
    let minus1_y = config.row_y(-1);
    let minus2_y = config.row_y(-2);

    let self_center_x = match self_node {
        Some(idx) => nodes[idx].x + config.node_width / 2.0,
        None => level0_width / 2.0,
    };
    let parents = place_couple_above(
        groups.father,
        groups.mother,
        self_center_x,
        minus1_y,
        gaps.parents_gap,
        config,
        &mut nodes,
        &mut edges,
    );

    let spouse_center_x = match spouse_node {
        Some(idx) => nodes[idx].x + config.node_width / 2.0,
        None => 0.0,
    };
    let in_laws = place_couple_above(
        groups.father_in_law,
        groups.mother_in_law,
        spouse_center_x,
        minus1_y,
        gaps.in_laws_gap,
        config,
        &mut nodes,
        &mut edges,
    );

    let paternal_gp = match parents.left {
        Some(idx) => {
            let center = nodes[idx].x + config.node_width / 2.0;
            place_couple_above(
                groups.paternal_grandfather,
                groups.paternal_grandmother,
                center,
                minus2_y,
                config.ancestor_pair_gap,
                config,
                &mut nodes,
                &mut edges,
            )
        }
        None => CoupleNodes::default(),
    };
    let maternal_gp = match parents.right {
        Some(idx) => {
            let center = nodes[idx].x + config.node_width / 2.0;
            place_couple_above(
                groups.maternal_grandfather,
                groups.maternal_grandmother,
                center,
                minus2_y,
                config.ancestor_pair_gap,
                config,
                &mut nodes,
                &mut edges,
            )
        }
        None => CoupleNodes::default(),
    };
    let spouse_paternal_gp = match in_laws.left {
        Some(idx) => {
            let center = nodes[idx].x + config.node_width / 2.0;
            place_couple_above(
                groups.spouse_paternal_grandfather,
                groups.spouse_paternal_grandmother,
                center,
                minus2_y,
                config.ancestor_pair_gap,
                config,
                &mut nodes,
                &mut edges,
            )
        }
        None => CoupleNodes::default(),
    };
    let spouse_maternal_gp = match in_laws.right {
        Some(idx) => {
            let center = nodes[idx].x + config.node_width / 2.0;
            place_couple_above(
                groups.spouse_maternal_grandfather,
                groups.spouse_maternal_grandmother,
                center,
                minus2_y,
                config.ancestor_pair_gap,
                config,
                &mut nodes,
                &mut edges,
            )
        }
        None => CoupleNodes::default(),
    };

    // Descendant generations hang off the anchor couple through the
    // recursive engine; the band centers on the couple's heart midpoint.
    let ctx = build_tree_context(members, config);
    if let Some(self_idx) = self_node
        && let Some(member_idx) = members.iter().position(|m| m.relation == Relation::Oneself)
    {
        let mut visited = HashSet::new();
        let unit = measure_subtree(member_idx, &ctx, &mut visited);
        let source = match spouse_node {
            Some(spouse_idx) => (
                (nodes[self_idx].x + config.node_width + nodes[spouse_idx].x) / 2.0,
                level0_y + config.node_height / 2.0,
            ),
            None => (
                nodes[self_idx].x + config.node_width / 2.0,
                level0_y + config.node_height,
            ),
        };
        place_children(
            &unit.children,
            unit.children_width,
            source.0,
            level0_y,
            source,
            &members[member_idx].id,
            &ctx,
            &mut nodes,
            &mut edges,
        );
    }

    if let (Some(self_idx), Some(spouse_idx)) = (self_node, spouse_node) {
        edges.push(TreeEdge {
            id: "e-self-spouse".to_string(),
            x1: nodes[self_idx].x + config.node_width,
            y1: nodes[self_idx].y + config.node_height / 2.0,
            x2: nodes[spouse_idx].x,
            y2: nodes[spouse_idx].y + config.node_height / 2.0,
            kind: EdgeKind::Solid,
            glyph: Some(EdgeGlyph::Heart),
            glyph_size: Some(GlyphSize::Large),
        });
    }

    // Sibling chains run along the anchor row as dashed links.
    let row_mid_y = level0_y + config.node_height / 2.0;
    for i in 0..self_sib_nodes.len().saturating_sub(1) {
        let a = self_sib_nodes[i];
        let b = self_sib_nodes[i + 1];
        edges.push(TreeEdge {
            id: format!("e-sib-{i}"),
            x1: nodes[a].x + config.node_width,
            y1: row_mid_y,
            x2: nodes[b].x,
            y2: row_mid_y,
            kind: EdgeKind::Dashed,
            glyph: None,
            glyph_size: None,
        });
    }
    if let (Some(&last), Some(self_idx)) = (self_sib_nodes.last(), self_node) {
        edges.push(TreeEdge {
            id: "e-sib-self".to_string(),
            x1: nodes[last].x + config.node_width,
            y1: row_mid_y,
            x2: nodes[self_idx].x,
            y2: row_mid_y,
            kind: EdgeKind::Dashed,
            glyph: None,
            glyph_size: None,
        });
    }
    if let Some(spouse_idx) = spouse_node
        && let Some(&first) = spouse_sib_nodes.first()
    {
        edges.push(TreeEdge {
            id: "e-spouse-sib".to_string(),
            x1: nodes[spouse_idx].x + config.node_width,
            y1: row_mid_y,
            x2: nodes[first].x,
            y2: row_mid_y,
            kind: EdgeKind::Dashed,
            glyph: None,
            glyph_size: None,
        });
        for i in 0..spouse_sib_nodes.len() - 1 {
            let a = spouse_sib_nodes[i];
            let b = spouse_sib_nodes[i + 1];
            edges.push(TreeEdge {
                id: format!("e-spsib-{i}"),
                x1: nodes[a].x + config.node_width,
                y1: row_mid_y,
                x2: nodes[b].x,
                y2: row_mid_y,
                kind: EdgeKind::Dashed,
                glyph: None,
                glyph_size: None,
            });
        }
    }

    // Ancestor connectors, top of the anchor down from each couple's heart.
    let minus1_heart_y = minus1_y + config.node_height / 2.0;
    if let Some(cx) = parents.center_x
        && let Some(self_idx) = self_node
    {
        edges.push(TreeEdge {
            id: "e-parents-self".to_string(),
            x1: cx,
            y1: minus1_heart_y,
            x2: nodes[self_idx].x + config.node_width / 2.0,
            y2: nodes[self_idx].y,
            kind: EdgeKind::Step,
            glyph: None,
            glyph_size: None,
        });
    }
    if let Some(cx) = in_laws.center_x
        && let Some(spouse_idx) = spouse_node
    {
        edges.push(TreeEdge {
            id: "e-inlaws-spouse".to_string(),
            x1: cx,
            y1: minus1_heart_y,
            x2: nodes[spouse_idx].x + config.node_width / 2.0,
            y2: nodes[spouse_idx].y,
            kind: EdgeKind::Step,
            glyph: None,
            glyph_size: None,
        });
    }

    let minus2_heart_y = minus2_y + config.node_height / 2.0;
    let grandparent_links = [
        ("e-pgp-f", &paternal_gp, parents.left),
        ("e-mgp-m", &maternal_gp, parents.right),
        ("e-spgp-fil", &spouse_paternal_gp, in_laws.left),
        ("e-smgp-mil", &spouse_maternal_gp, in_laws.right),
    ];
    for (id, grandparents, parent_idx) in grandparent_links {
        if let Some(cx) = grandparents.center_x
            && let Some(parent_idx) = parent_idx
        {
            edges.push(TreeEdge {
                id: id.to_string(),
                x1: cx,
                y1: minus2_heart_y,
                x2: nodes[parent_idx].x + config.node_width / 2.0,
                y2: nodes[parent_idx].y,
                kind: EdgeKind::Step,
                glyph: None,
                glyph_size: None,
            });
        }
    }

    let (width, height) = symmetrize(&mut nodes, &mut edges, self_node, spouse_node, config);
    TreeLayout {
        nodes,
        edges,
        width,
        height,
    }
}

/// Recenter the finished graph so the anchor couple's midpoint lands exactly
/// on half the canvas width, whatever the two wings weigh.
fn symmetrize(
    nodes: &mut [TreeNode],
    edges: &mut [TreeEdge],
    self_node: Option<usize>,
    spouse_node: Option<usize>,
    config: &TreeConfig,
) -> (f32, f32) {
    if nodes.is_empty() {
        return (0.0, 0.0);
    }

    let core_center_x = match (self_node, spouse_node) {
        (Some(a), Some(b)) => (nodes[a].x + config.node_width + nodes[b].x) / 2.0,
        (Some(a), None) => nodes[a].x + config.node_width / 2.0,
        (None, Some(b)) => nodes[b].x + config.node_width / 2.0,
        (None, None) => {
            let mut min_x = f32::MAX;
            let mut max_x = f32::MIN;
            for node in nodes.iter() {
                min_x = min_x.min(node.x);
                max_x = max_x.max(node.x);
            }
            (min_x + max_x) / 2.0
        }
    };

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for node in nodes.iter() {
        min_x = min_x.min(node.x);
        max_x = max_x.max(node.x + config.node_width);
        max_y = max_y.max(node.y);
    }

    let left_wing = core_center_x - min_x;
    let right_wing = max_x - core_center_x;
    let max_wing = left_wing.max(right_wing) + config.wing_padding;
    let width = (max_wing * 2.0).max(config.min_canvas_width);
    let shift_x = width / 2.0 - core_center_x;

    for node in nodes.iter_mut() {
        node.x += shift_x;
    }
    for edge in edges.iter_mut() {
        edge.x1 += shift_x;
        edge.x2 += shift_x;
    }

    let height = max_y + config.node_height + config.bottom_margin;
    (width, height)
}
