use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use family_tree_layout::config::TreeConfig;
use family_tree_layout::layout::compute_family_layouts;
use family_tree_layout::member::{FamilyMember, Relation, parse_members};
use std::hint::black_box;

fn synthetic_family(children: usize) -> Vec<FamilyMember> {
    let mut members = vec![
        FamilyMember::new("self", "self", Relation::Oneself),
        FamilyMember::new("spouse", "spouse", Relation::Spouse),
        FamilyMember::new("brother", "brother", Relation::Brother),
        FamilyMember::new("father", "father", Relation::Father),
        FamilyMember::new("mother", "mother", Relation::Mother),
        FamilyMember::new("pgf", "pgf", Relation::PaternalGrandfather),
        FamilyMember::new("pgm", "pgm", Relation::PaternalGrandmother),
        FamilyMember::new("fil", "fil", Relation::FatherInLaw),
        FamilyMember::new("mil", "mil", Relation::MotherInLaw),
        FamilyMember::new("ex", "ex", Relation::SelfExSpouse),
        FamilyMember::new("ex-son", "ex-son", Relation::SelfExSon),
    ];
    for i in 0..children {
        let id = format!("child-{i}");
        let relation = if i % 2 == 0 {
            Relation::Son
        } else {
            Relation::Daughter
        };
        let mut child = FamilyMember::new(&id, &id, relation);
        child.parent_id = Some("self".to_string());
        members.push(child);

        // Every other child gets a partner and a grandchild of their own.
        if i % 2 == 1 {
            let partner_id = format!("partner-{i}");
            let mut partner = FamilyMember::new(&partner_id, &partner_id, Relation::SonInLaw);
            partner.partner_id = Some(id.clone());
            members.push(partner);

            let grand_id = format!("grand-{i}");
            let mut grandchild = FamilyMember::new(&grand_id, &grand_id, Relation::Grandson);
            grandchild.parent_id = Some(id.clone());
            members.push(grandchild);
        }
    }
    members
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, children) in [("small", 2usize), ("medium", 12), ("large", 48)] {
        let json =
            serde_json::to_string(&synthetic_family(children)).expect("serialization failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &json, |b, data| {
            b.iter(|| {
                let members = parse_members(black_box(data)).expect("parse failed");
                black_box(members.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = TreeConfig::default();
    for (name, children) in [("small", 2usize), ("medium", 12), ("large", 48)] {
        let members = synthetic_family(children);
        group.bench_with_input(BenchmarkId::from_parameter(name), &members, |b, data| {
            b.iter(|| {
                let layouts = compute_family_layouts(black_box(data), &config);
                black_box(layouts.main.nodes.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = TreeConfig::default();
    for (name, children) in [("small", 2usize), ("medium", 12), ("large", 48)] {
        let json =
            serde_json::to_string(&synthetic_family(children)).expect("serialization failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &json, |b, data| {
            b.iter(|| {
                let members = parse_members(black_box(data)).expect("parse failed");
                let layouts = compute_family_layouts(&members, &config);
                black_box(layouts.main.edges.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_layout, bench_end_to_end
);
criterion_main!(benches);
