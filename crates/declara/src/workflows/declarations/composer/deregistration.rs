use super::{merge_spans, or_placeholder, qualification_paragraph, Context, BLANK_UNIT};
use crate::workflows::declarations::document::{Block, Span};

/// Request to the registry office to annotate the unit's exit from PMCMV.
pub(super) fn blocks(context: &Context<'_>) -> Vec<Block> {
    let project = context.project;
    let state = context.state;

    let parent = if project.is_parent_registry { " mãe" } else { "" };
    let mut registry = format!("objeto da matrícula{parent} nº {}", project.registry_number);
    let individual = state.registry_override.trim();
    if !individual.is_empty() {
        registry.push_str(&format!(", e matrícula individualizada nº {individual}"));
    }

    let mut request = vec![
        Span::plain(
            "Na qualidade de proprietária e incorporadora do empreendimento denominado ",
        ),
        Span::emphasis(project.name.clone()),
        Span::plain(format!(
            ", {registry} do {}, vem requerer a V.Sa. a averbação do ",
            project.registry_office
        )),
        Span::emphasis("DESENQUADRAMENTO"),
        Span::plain(" do imóvel referente a "),
    ];

    if project.house_based {
        request.push(Span::plain("Casa "));
        request.push(Span::emphasis(or_placeholder(
            &state.unit.house_number,
            BLANK_UNIT,
        )));
    } else {
        request.push(Span::plain("unidade "));
        request.push(Span::emphasis(or_placeholder(
            &state.unit.unit_number,
            BLANK_UNIT,
        )));
        let tower = state.unit.tower_name.trim();
        if !tower.is_empty() {
            request.push(Span::plain(format!(", Torre {tower}")));
        }
    }

    request.push(Span::plain(", do "));
    request.push(Span::emphasis("PROGRAMA MINHA CASA MINHA VIDA - PMCMV"));
    request.push(Span::plain("."));

    vec![
        Block::heading([format!(
            "ILUSTRÍSSIMO SENHOR DOUTOR DO {}",
            project.registry_office.to_uppercase()
        )]),
        qualification_paragraph(project),
        Block::paragraph(merge_spans(request)),
        Block::plain_paragraph("A presente solicitação atende ao disposto na legislação vigente."),
        context.entity_closing(),
    ]
}
