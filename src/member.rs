use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Cn,
    Us,
    Uk,
    Ca,
    Au,
    Sg,
    Jp,
    Hk,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    SubHealthy,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Oneself,
    Spouse,
    Brother,
    Sister,
    BrotherInLaw,
    SisterInLaw,
    Parent,
    Father,
    Mother,
    FatherInLaw,
    MotherInLaw,
    PaternalGrandfather,
    PaternalGrandmother,
    MaternalGrandfather,
    MaternalGrandmother,
    Grandfather,
    Grandmother,
    SpousePaternalGrandfather,
    SpousePaternalGrandmother,
    SpouseMaternalGrandfather,
    SpouseMaternalGrandmother,
    SpouseGrandfather,
    SpouseGrandmother,
    Child,
    Son,
    Daughter,
    SonInLaw,
    DaughterInLaw,
    Grandchild,
    Grandson,
    Granddaughter,
    GrandsonInLaw,
    GranddaughterInLaw,
    GreatGrandchild,
    GreatGrandson,
    GreatGranddaughter,
    SelfExSpouse,
    SelfExSon,
    SelfExDaughter,
    SelfExSonInLaw,
    SelfExDaughterInLaw,
    SelfExGrandson,
    SelfExGranddaughter,
    Unknown,
}

const RELATION_WIRE: &[(&str, Relation)] = &[
    ("self", Relation::Oneself),
    ("spouse", Relation::Spouse),
    ("brother", Relation::Brother),
    ("sister", Relation::Sister),
    ("brother_in_law", Relation::BrotherInLaw),
    ("sister_in_law", Relation::SisterInLaw),
    ("parent", Relation::Parent),
    ("father", Relation::Father),
    ("mother", Relation::Mother),
    ("father_in_law", Relation::FatherInLaw),
    ("mother_in_law", Relation::MotherInLaw),
    ("paternal_grandfather", Relation::PaternalGrandfather),
    ("paternal_grandmother", Relation::PaternalGrandmother),
    ("maternal_grandfather", Relation::MaternalGrandfather),
    ("maternal_grandmother", Relation::MaternalGrandmother),
    ("grandfather", Relation::Grandfather),
    ("grandmother", Relation::Grandmother),
    ("spouse_paternal_grandfather", Relation::SpousePaternalGrandfather),
    ("spouse_paternal_grandmother", Relation::SpousePaternalGrandmother),
    ("spouse_maternal_grandfather", Relation::SpouseMaternalGrandfather),
    ("spouse_maternal_grandmother", Relation::SpouseMaternalGrandmother),
    ("spouse_grandfather", Relation::SpouseGrandfather),
    ("spouse_grandmother", Relation::SpouseGrandmother),
    ("child", Relation::Child),
    ("son", Relation::Son),
    ("daughter", Relation::Daughter),
    ("son_in_law", Relation::SonInLaw),
    ("daughter_in_law", Relation::DaughterInLaw),
    ("grandchild", Relation::Grandchild),
    ("grandson", Relation::Grandson),
    ("granddaughter", Relation::Granddaughter),
    ("grandson_in_law", Relation::GrandsonInLaw),
    ("granddaughter_in_law", Relation::GranddaughterInLaw),
    ("great_grandchild", Relation::GreatGrandchild),
    ("great_grandson", Relation::GreatGrandson),
    ("great_granddaughter", Relation::GreatGranddaughter),
    ("self_ex_spouse", Relation::SelfExSpouse),
    ("self_ex_son", Relation::SelfExSon),
    ("self_ex_daughter", Relation::SelfExDaughter),
    ("self_ex_son_in_law", Relation::SelfExSonInLaw),
    ("self_ex_daughter_in_law", Relation::SelfExDaughterInLaw),
    ("self_ex_grandson", Relation::SelfExGrandson),
    ("self_ex_granddaughter", Relation::SelfExGranddaughter),
    ("unknown", Relation::Unknown),
];

static WIRE_LOOKUP: Lazy<HashMap<&'static str, Relation>> =
    Lazy::new(|| RELATION_WIRE.iter().copied().collect());

static RELATION_LABELS: Lazy<HashMap<Relation, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (Relation::Oneself, "本人"),
        (Relation::Spouse, "配偶"),
        (Relation::Brother, "兄弟"),
        (Relation::Sister, "姐妹"),
        (Relation::BrotherInLaw, "配偶兄弟"),
        (Relation::SisterInLaw, "配偶姐妹"),
        (Relation::Parent, "父母"),
        (Relation::Father, "父亲"),
        (Relation::Mother, "母亲"),
        (Relation::FatherInLaw, "岳父/公公"),
        (Relation::MotherInLaw, "岳母/婆婆"),
        (Relation::PaternalGrandfather, "祖父"),
        (Relation::PaternalGrandmother, "祖母"),
        (Relation::MaternalGrandfather, "外祖父"),
        (Relation::MaternalGrandmother, "外祖母"),
        (Relation::Grandfather, "祖父"),
        (Relation::Grandmother, "祖母"),
        (Relation::SpousePaternalGrandfather, "配偶祖父"),
        (Relation::SpousePaternalGrandmother, "配偶祖母"),
        (Relation::SpouseMaternalGrandfather, "配偶外祖父"),
        (Relation::SpouseMaternalGrandmother, "配偶外祖母"),
        (Relation::SpouseGrandfather, "配偶祖父"),
        (Relation::SpouseGrandmother, "配偶祖母"),
        (Relation::Child, "子女"),
        (Relation::Son, "儿子"),
        (Relation::Daughter, "女儿"),
        (Relation::SonInLaw, "女婿"),
        (Relation::DaughterInLaw, "儿媳"),
        (Relation::Grandchild, "孙辈"),
        (Relation::Grandson, "孙子/外孙"),
        (Relation::Granddaughter, "孙女/外孙女"),
        (Relation::GrandsonInLaw, "孙女婿"),
        (Relation::GranddaughterInLaw, "孙媳"),
        (Relation::GreatGrandchild, "曾孙辈"),
        (Relation::GreatGrandson, "曾孙"),
        (Relation::GreatGranddaughter, "曾孙女"),
        (Relation::SelfExSpouse, "前妻/前夫"),
        (Relation::SelfExSon, "前任子女(男)"),
        (Relation::SelfExDaughter, "前任子女(女)"),
        (Relation::SelfExSonInLaw, "前任女婿"),
        (Relation::SelfExDaughterInLaw, "前任儿媳"),
        (Relation::SelfExGrandson, "前任孙辈(男)"),
        (Relation::SelfExGranddaughter, "前任孙辈(女)"),
        (Relation::Unknown, "其他"),
    ])
});

impl Relation {
    pub fn from_wire(name: &str) -> Self {
        WIRE_LOOKUP.get(name).copied().unwrap_or(Relation::Unknown)
    }

    pub fn wire_name(self) -> &'static str {
        RELATION_WIRE
            .iter()
            .find(|(_, relation)| *relation == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Generation band relative to self: ancestors negative, descendants
    /// positive, the anchor row (self, spouse, siblings) at zero.
    pub fn level(self) -> i32 {
        match self {
            Relation::PaternalGrandfather
            | Relation::PaternalGrandmother
            | Relation::MaternalGrandfather
            | Relation::MaternalGrandmother
            | Relation::Grandfather
            | Relation::Grandmother
            | Relation::SpousePaternalGrandfather
            | Relation::SpousePaternalGrandmother
            | Relation::SpouseMaternalGrandfather
            | Relation::SpouseMaternalGrandmother
            | Relation::SpouseGrandfather
            | Relation::SpouseGrandmother => -2,
            Relation::Parent
            | Relation::Father
            | Relation::Mother
            | Relation::FatherInLaw
            | Relation::MotherInLaw => -1,
            Relation::Oneself
            | Relation::Spouse
            | Relation::Brother
            | Relation::Sister
            | Relation::BrotherInLaw
            | Relation::SisterInLaw
            | Relation::SelfExSpouse
            | Relation::Unknown => 0,
            Relation::Child
            | Relation::Son
            | Relation::Daughter
            | Relation::SonInLaw
            | Relation::DaughterInLaw
            | Relation::SelfExSon
            | Relation::SelfExDaughter
            | Relation::SelfExSonInLaw
            | Relation::SelfExDaughterInLaw => 1,
            Relation::Grandchild
            | Relation::Grandson
            | Relation::Granddaughter
            | Relation::GrandsonInLaw
            | Relation::GranddaughterInLaw
            | Relation::SelfExGrandson
            | Relation::SelfExGranddaughter => 2,
            Relation::GreatGrandchild
            | Relation::GreatGrandson
            | Relation::GreatGranddaughter => 3,
        }
    }

    /// True for the roles belonging to a dissolved relationship. These are
    /// excluded from the main tree and laid out in their own sub-graph.
    pub fn is_former(self) -> bool {
        matches!(
            self,
            Relation::SelfExSpouse
                | Relation::SelfExSon
                | Relation::SelfExDaughter
                | Relation::SelfExSonInLaw
                | Relation::SelfExDaughterInLaw
                | Relation::SelfExGrandson
                | Relation::SelfExGranddaughter
        )
    }

    pub fn is_former_union(self) -> bool {
        self == Relation::SelfExSpouse
    }

    /// In-law roles never start a subtree of their own; they co-locate next
    /// to the partner that links them into the family.
    pub fn is_in_law(self) -> bool {
        matches!(
            self,
            Relation::BrotherInLaw
                | Relation::SisterInLaw
                | Relation::FatherInLaw
                | Relation::MotherInLaw
                | Relation::SonInLaw
                | Relation::DaughterInLaw
                | Relation::GrandsonInLaw
                | Relation::GranddaughterInLaw
                | Relation::SelfExSonInLaw
                | Relation::SelfExDaughterInLaw
        )
    }

    pub fn label(self) -> &'static str {
        RELATION_LABELS.get(&self).copied().unwrap_or("其他")
    }
}

impl Serialize for Relation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for Relation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RelationVisitor;

        impl Visitor<'_> for RelationVisitor {
            type Value = Relation;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a family relation name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Relation, E>
            where
                E: de::Error,
            {
                // Unrecognized names decode as Unknown rather than failing
                // the whole member list.
                Ok(Relation::from_wire(value))
            }
        }

        deserializer.deserialize_str(RelationVisitor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: String,
    pub case_id: String,
    pub name: String,
    pub relation: Relation,
    pub parent_id: Option<String>,
    pub partner_id: Option<String>,
    pub age: u32,
    pub gender: Gender,
    pub nationality: Region,
    pub tax_residencies: Vec<Region>,
    pub days_in_country: Option<u32>,
    pub domicile: Option<bool>,
    pub health_status: HealthStatus,
    pub marital_status: MaritalStatus,
    pub residence: Option<String>,
    pub notes: Option<String>,
}

impl FamilyMember {
    pub fn new(id: impl Into<String>, name: impl Into<String>, relation: Relation) -> Self {
        Self {
            id: id.into(),
            case_id: String::new(),
            name: name.into(),
            relation,
            parent_id: None,
            partner_id: None,
            age: 0,
            gender: Gender::Male,
            nationality: Region::Other,
            tax_residencies: Vec::new(),
            days_in_country: None,
            domicile: None,
            health_status: HealthStatus::Healthy,
            marital_status: MaritalStatus::Single,
            residence: None,
            notes: None,
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid member data: {0}")]
pub struct MemberError(#[from] serde_json::Error);

/// Parses a JSON array of member records. Accepts json5 extensions
/// (comments, trailing commas) for hand-maintained files; when both parsers
/// fail, the strict JSON error is the one reported.
pub fn parse_members(input: &str) -> Result<Vec<FamilyMember>, MemberError> {
    match serde_json::from_str::<Vec<FamilyMember>>(input) {
        Ok(members) => Ok(members),
        Err(json_err) => match json5::from_str::<Vec<FamilyMember>>(input) {
            Ok(members) => Ok(members),
            Err(_) => Err(MemberError::from(json_err)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_generation_levels() {
        assert_eq!(Relation::Oneself.level(), 0);
        assert_eq!(Relation::SelfExSpouse.level(), 0);
        assert_eq!(Relation::Father.level(), -1);
        assert_eq!(Relation::MotherInLaw.level(), -1);
        assert_eq!(Relation::SpouseMaternalGrandmother.level(), -2);
        assert_eq!(Relation::Son.level(), 1);
        assert_eq!(Relation::GranddaughterInLaw.level(), 2);
        assert_eq!(Relation::GreatGrandson.level(), 3);
        assert_eq!(Relation::Unknown.level(), 0);
    }

    #[test]
    fn recognizes_past_relations() {
        assert!(Relation::SelfExSpouse.is_former());
        assert!(Relation::SelfExGranddaughter.is_former());
        assert!(!Relation::Spouse.is_former());
        assert!(!Relation::Daughter.is_former());
        assert!(Relation::SelfExSpouse.is_former_union());
        assert!(!Relation::SelfExSon.is_former_union());
    }

    #[test]
    fn wire_names_round_trip() {
        for (name, relation) in RELATION_WIRE {
            assert_eq!(Relation::from_wire(name), *relation);
            assert_eq!(relation.wire_name(), *name, "wire name for {relation:?}");
            assert!(!relation.label().is_empty(), "label for {relation:?}");
        }
    }

    #[test]
    fn unmapped_relation_becomes_unknown() {
        assert_eq!(Relation::from_wire("step_uncle"), Relation::Unknown);
        assert_eq!(Relation::from_wire(""), Relation::Unknown);
        assert_eq!(Relation::Unknown.level(), 0);
    }

    #[test]
    fn parses_camel_case_member_json() {
        let input = r#"[{
            "id": "m1",
            "caseId": "case-001",
            "name": "张伟",
            "relation": "self",
            "partnerId": "m2",
            "age": 45,
            "gender": "male",
            "nationality": "CN",
            "taxResidencies": ["CN", "SG"],
            "daysInCountry": 200,
            "healthStatus": "sub_healthy",
            "maritalStatus": "married",
            "residence": "上海"
        }]"#;
        let members = parse_members(input).unwrap();
        assert_eq!(members.len(), 1);
        let member = &members[0];
        assert_eq!(member.relation, Relation::Oneself);
        assert_eq!(member.partner_id.as_deref(), Some("m2"));
        assert_eq!(member.parent_id, None);
        assert_eq!(member.nationality, Region::Cn);
        assert_eq!(member.tax_residencies, vec![Region::Cn, Region::Sg]);
        assert_eq!(member.health_status, HealthStatus::SubHealthy);
        assert_eq!(member.days_in_country, Some(200));
    }

    #[test]
    fn falls_back_to_json5_for_lenient_input() {
        let input = r#"[
            // the client keeps this file by hand
            {
                id: "m1",
                caseId: "case-001",
                name: "张伟",
                relation: "self",
                age: 45,
                gender: "male",
                nationality: "CN",
                taxResidencies: ["CN"],
                healthStatus: "healthy",
                maritalStatus: "married",
            },
        ]"#;
        let members = parse_members(input).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].relation, Relation::Oneself);
    }

    #[test]
    fn reports_strict_error_when_both_parsers_fail() {
        let err = parse_members("not a member list").unwrap_err();
        assert!(err.to_string().contains("invalid member data"));
    }
}
