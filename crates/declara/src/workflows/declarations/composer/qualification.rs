use super::{merge_spans, qualification_paragraph, Context, ResolutionError};
use crate::workflows::declarations::document::{Block, Span};

pub const CLIENT_QUALIFICATION_PLACEHOLDER: &str = "<QUALIFICAÇÃO DO CLIENTE>";

/// Certificate that the buyer's income fits the selected category.
pub(super) fn blocks(context: &Context<'_>) -> Result<Vec<Block>, ResolutionError> {
    let category = context.category()?;

    let mut certifies = vec![Span::emphasis("CERTIFICA que"), Span::plain(" ")];
    certifies.extend(client_qualification(&context.state.party1.qualification));
    certifies.push(Span::plain(
        ", nos termos do art. 47, § 1º, inc. II da Lei nº 16.050/2014, e demais regulamentações decorrentes.",
    ));

    let income = context.income_text().unwrap_or_default();

    Ok(vec![
        Block::heading([
            "CERTIDÃO DE ENQUADRAMENTO".to_string(),
            category.full_label.clone(),
        ]),
        qualification_paragraph(context.project),
        Block::paragraph(merge_spans(certifies)),
        Block::Callout {
            lines: vec![
                "ESTÁ ENQUADRADO".to_string(),
                "Na faixa de renda".to_string(),
                format!("({})", category.label),
            ],
        },
        Block::plain_paragraph(format!(
            "Os documentos apresentados comprovam uma renda familiar atual e declarada {income} conforme disposições contidas no Decreto Municipal nº 64.006/2025 e suas atualizações."
        )),
        Block::plain_paragraph(
            "Declaramos que as informações prestadas estão em conformidade com os documentos recebidos do solicitante.",
        ),
        context.entity_closing(),
    ])
}

/// Names before the first comma are emphasized; the rest stays plain.
pub(crate) fn client_qualification(text: &str) -> Vec<Span> {
    if text.trim().is_empty() {
        return vec![Span::emphasis(CLIENT_QUALIFICATION_PLACEHOLDER)];
    }
    match text.find(',') {
        Some(comma) => vec![
            Span::emphasis(&text[..comma]),
            Span::plain(&text[comma..]),
        ],
        None => vec![Span::emphasis(text)],
    }
}
