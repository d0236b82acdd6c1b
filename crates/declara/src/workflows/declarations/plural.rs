use serde::Serialize;

use super::form::FormState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammaticalNumber {
    Singular,
    Plural,
}

/// First-person forms used by declarations signed by one or two parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrammaticalForms {
    pub number: GrammaticalNumber,
    pub subject: &'static str,
    pub possessive: &'static str,
    pub declare: &'static str,
    pub owner: &'static str,
    pub have: &'static str,
    pub ratify: &'static str,
    pub sign: &'static str,
}

pub const SINGULAR: GrammaticalForms = GrammaticalForms {
    number: GrammaticalNumber::Singular,
    subject: "Eu",
    possessive: "minha",
    declare: "declaro",
    owner: "proprietário",
    have: "tenho",
    ratify: "ratifico",
    sign: "firmo",
};

pub const PLURAL: GrammaticalForms = GrammaticalForms {
    number: GrammaticalNumber::Plural,
    subject: "Nós",
    possessive: "nossa",
    declare: "declaramos",
    owner: "proprietários",
    have: "temos",
    ratify: "ratificamos",
    sign: "firmamos",
};

/// Pick the form table for the number of declaring parties.
pub fn resolve(second_party_present: bool) -> &'static GrammaticalForms {
    if second_party_present {
        &PLURAL
    } else {
        &SINGULAR
    }
}

pub fn resolve_for(state: &FormState) -> &'static GrammaticalForms {
    resolve(state.has_second_party())
}
