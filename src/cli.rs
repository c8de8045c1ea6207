use crate::config::load_config;
use crate::layout::compute_family_layouts;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::member::{FamilyMember, parse_members};
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ftl", version, about = "Family tree layout engine")]
pub struct Args {
    /// Input members file (JSON or JSON5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output layout file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file overriding the layout geometry
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Only lay out members belonging to this case
    #[arg(long = "case")]
    pub case: Option<String>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let mut members = parse_members(&input)?;
    members = filter_case(members, args.case.as_deref());

    let layouts = compute_family_layouts(&members, &config.tree);

    if let Some(path) = &args.output {
        write_layout_dump(path, &layouts, &config.tree)?;
    } else {
        let dump = LayoutDump::from_layouts(&layouts, &config.tree);
        let json = serde_json::to_string_pretty(&dump)?;
        println!("{json}");
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn filter_case(members: Vec<FamilyMember>, case: Option<&str>) -> Vec<FamilyMember> {
    let Some(case) = case else {
        return members;
    };
    members.into_iter().filter(|m| m.case_id == case).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Relation;

    #[test]
    fn filters_members_by_case() {
        let mut a = FamilyMember::new("a", "a", Relation::Oneself);
        a.case_id = "case-001".to_string();
        let mut b = FamilyMember::new("b", "b", Relation::Spouse);
        b.case_id = "case-002".to_string();

        let kept = filter_case(vec![a.clone(), b.clone()], Some("case-001"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");

        let all = filter_case(vec![a, b], None);
        assert_eq!(all.len(), 2);
    }
}
