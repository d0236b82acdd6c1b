use super::{merge_spans, or_placeholder, Context, BLANK_ID};
use crate::workflows::declarations::document::{Alignment, Block, Signatory, Span};
use crate::workflows::declarations::form::AcquisitionType;

const FIRST_ACQUISITION: &str = "(1) esta é a minha primeira aquisição imobiliária; (2) que o imóvel é para fins residenciais; e (3) que o adquiro através de financiamento pelo Sistema Financeiro de Habitação, me enquadrando no disposto no art. 290 da Lei 6.015/73 que dispõe:";
const FEE_REDUCTION_QUOTE: &str = "“Os emolumentos devidos pelos atos relacionados com a primeira aquisição imobiliária para fins residenciais, financiada pelo Sistema Financeiro da Habitação, serão reduzidos em 50% (cinquenta por cento)”.";
const FALSE_STATEMENT_NOTICE: &str = "Declaro ainda que tenho ciência que o não enquadramento nas condições acima resulta na perda dos benefícios supra mencionados e na obrigatoriedade da complementação dos emolumentos, bem como que inserir declaração falsa em documento público, com fim de prejudicar direito, criar obrigação ou alterar fato juridicamente relevante caracteriza crime de falsidade ideológica previsto no art. 299 do Código Penal com pena de 1 (um) a 5 (cinco) anos de reclusão, e multa, sem prejuízo das demais responsabilidades civis.";
const SECOND_ACQUISITION: &str = "Declaro ter ciência de que não tenho direito à redução de emolumentos por não me enquadrar nos critérios legais para a concessão de tal benefício.";

/// First/second acquisition declaration; exactly one clause is marked.
pub(super) fn blocks(context: &Context<'_>) -> Vec<Block> {
    let party = &context.state.party1;
    let first = context.state.acquisition_type == AcquisitionType::First;

    let opening = vec![
        Span::plain("Eu, "),
        Span::emphasis(or_placeholder(&party.name, "_______________")),
        Span::plain(", portador(a) da Carteira de Registro de Identidade Nº: "),
        Span::emphasis(or_placeholder(&party.state_id, BLANK_ID)),
        Span::plain(" e do CPF N°: "),
        Span::emphasis(or_placeholder(&party.tax_id, BLANK_ID)),
        Span::plain(", declaro para os devidos fins, que:"),
    ];

    vec![
        Block::heading([
            format!(
                "ILMO. SR. OFICIAL DO CARTÓRIO DO {}",
                context.project.registry_office.to_uppercase()
            ),
            "DECLARAÇÃO DE PRIMEIRA/SEGUNDA AQUISIÇÃO".to_string(),
        ]),
        Block::paragraph(merge_spans(opening)),
        Block::Checkbox {
            marked: first,
            paragraphs: vec![
                vec![Span::plain(FIRST_ACQUISITION)],
                vec![Span::plain(FEE_REDUCTION_QUOTE)],
                vec![Span::plain(FALSE_STATEMENT_NOTICE)],
            ],
        },
        Block::Checkbox {
            marked: !first,
            paragraphs: vec![vec![Span::plain(SECOND_ACQUISITION)]],
        },
        Block::Closing {
            place_date: format!("{}.", context.place_date()),
            alignment: Alignment::Center,
            signatories: vec![Signatory {
                name: or_placeholder(&party.name, "CLIENTE"),
                details: vec![format!(
                    "CPF n° {}",
                    or_placeholder(&party.tax_id, "___________")
                )],
            }],
            note: None,
        },
    ]
}
