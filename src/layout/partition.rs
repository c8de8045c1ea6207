use super::*;

#[derive(Debug)]
pub(super) struct Partition {
    pub main: Vec<FamilyMember>,
    pub self_past: Vec<FamilyMember>,
    pub spouse_past: Vec<FamilyMember>,
}

// Roles that belonged to a dissolved relationship on the spouse's side. The
// feature was retired upstream; the empty set keeps the pathway alive so it
// can be repopulated without re-plumbing the layout.
const SPOUSE_PAST_ROLES: &[Relation] = &[];

pub(super) fn partition_members(members: &[FamilyMember]) -> Partition {
    let mut main = Vec::new();
    let mut self_past = Vec::new();
    let mut spouse_past = Vec::new();

    for member in members {
        if member.relation.is_former() {
            self_past.push(member.clone());
        } else if SPOUSE_PAST_ROLES.contains(&member.relation) {
            spouse_past.push(member.clone());
        } else {
            main.push(member.clone());
        }
    }

    // Each past sub-graph is anchored by a clone of its reference person,
    // appended last and rendered ghosted.
    if !self_past.is_empty()
        && let Some(anchor) = members.iter().find(|m| m.relation == Relation::Oneself)
    {
        self_past.push(anchor.clone());
    }
    if !spouse_past.is_empty()
        && let Some(anchor) = members.iter().find(|m| m.relation == Relation::Spouse)
    {
        spouse_past.push(anchor.clone());
    }

    Partition {
        main,
        self_past,
        spouse_past,
    }
}
