use super::{merge_spans, or_placeholder, Context, ResolutionError, BLANK_ID, BLANK_UNIT};
use crate::workflows::declarations::document::{Alignment, Block, Signatory, Span};
use crate::workflows::declarations::form::Party;

const BLANK_NAME: &str = "__________________";
const BLANK_INCOME: &str = "[X] (X REAIS)";

const OBLIGATIONS: [&str; 5] = [
    "locar para família ou pessoa física enquadrada na faixa de renda mensal familiar acima prevista, devendo o aluguel representar até 30% (trinta por cento) da faixa de renda prevista para a respectiva tipologia, sendo vedada a locação por curta, curtíssima temporada ou por comodato;",
    "comprovar o enquadramento do locatário, por meio de Certidão, que poderá ser elaborada por terceiro ou pelo locador da unidade, mediante o recebimento dos documentos que comprovem a renda do locatário, devendo ser observadas as disposições da Lei Federal nº 13.709/2018 – Lei Geral de Proteção de Dados (LGPD), no que diz respeito ao tratamento de dados pessoais do locatário;",
    "ser o responsável pela veracidade das informações que constarão da Certidão e pela guarda dos documentos que comprovam o enquadramento da renda mensal familiar do locatário;",
    "informar, de forma clara e legível, a tipologia da unidade nos anúncios e peças publicitárias referentes à locação da unidade, assim como no contrato de locação;",
    "cadastrar em plataforma eletrônica específica a ser disponibilizada pela Prefeitura o contrato de locação e os documentos de renda que comprovam a destinação da unidade.",
];

/// Investor's awareness that the unit's income band does not apply to them.
pub(super) fn blocks(context: &Context<'_>) -> Result<Vec<Block>, ResolutionError> {
    let category = context.category()?;
    let forms = context.forms;
    let state = context.state;
    let second = state.second_party().filter(|party| party.has_name());

    let mut opening = vec![Span::plain(format!("{}, ", forms.subject))];
    opening.extend(party_identity(&state.party1));
    if let Some(party2) = second {
        opening.push(Span::plain(" e "));
        opening.extend(party_identity(party2));
    }
    opening.push(Span::plain(format!(
        ", {} do imóvel localizado em ",
        forms.owner
    )));
    opening.push(Span::emphasis(context.project.address.clone()));
    opening.push(Span::plain(format!(
        ", {} para os devidos fins ter ciência de ter adquirido uma unidade habitacional destinada a pessoas físicas com renda familiar atual e declarada ",
        forms.declare
    )));
    opening.push(Span::emphasis(
        context
            .income_text()
            .unwrap_or_else(|| BLANK_INCOME.to_string()),
    ));
    opening.push(Span::plain(format!(
        ", conforme disposições contidas no Decreto Municipal nº 64.006/2025 e suas atualizações. Declaro, ainda, que {} renda familiar atual não se enquadra nesse limite, ciente do meu desenquadramento em relação à faixa de renda exigida para a destinação dessa unidade, de modo que a unidade em questão NÃO TEM A FINALIDADE DE MINHA MORADIA PRÓPRIA.",
        forms.possessive
    )));

    let mut obligations = vec![vec![Span::plain(format!(
        "requerer, perante o respectivo Cartório de Registro de Imóveis, a averbação na matrícula da referida unidade indicando o uso para locação, conforme previsto no inciso I, §9°, do artigo 47, da Lei Municipal n° 16.050/2014 e no artigo 7°, inciso I, do Decreto 63.130/2024. {} ciência, ainda, que, caso pretenda alienar futuramente a unidade para pessoa enquadrada na faixa de renda legal, é de minha responsabilidade proceder com o pedido de baixa da averbação da locação perante o Cartório de Registro de Imóveis;",
        capitalize(forms.have)
    ))]];
    obligations.extend(OBLIGATIONS.iter().map(|item| vec![Span::plain(*item)]));

    let mut signatories = vec![Signatory {
        name: signatory_name(&state.party1, "PROPRIETÁRIO 1"),
        details: Vec::new(),
    }];
    if let Some(party2) = second {
        signatories.push(Signatory {
            name: signatory_name(party2, "PROPRIETÁRIO 2"),
            details: Vec::new(),
        });
    }

    Ok(vec![
        Block::heading([
            "DECLARAÇÃO DE CIÊNCIA DE DESENQUADRAMENTO".to_string(),
            category.full_label.clone(),
        ]),
        Block::paragraph(merge_spans(opening)),
        Block::plain_paragraph(format!(
            "{}, ainda para os devidos fins, que para cumprimento do mencionado no item acima, destinará a unidade autônoma ora adquirida, exclusivamente, à revenda ou locação para pessoa física que comprove enquadrar-se nas regras estabelecidas na legislação, através da demonstração da sua renda familiar mediante apresentação da documentação comprobatória, considerando as regras de enquadramento de renda familiar mensal previstas para a destinação, conforme artigos 46 e 47 do Plano Diretor Estratégico.",
            forms.declare.to_uppercase()
        )),
        Block::plain_paragraph(
            "Caso a destinação da unidade acima identificada seja feita via locação para pessoas enquadradas na faixa de renda mensal familiar prevista na legislação, DECLARA ter ciência das seguintes obrigações, sujeitas à fiscalização do Poder Público e às penalidades previstas em Lei em caso de descumprimento:",
        ),
        Block::BulletList { items: obligations },
        Block::plain_paragraph(
            "Caso a alienação da unidade acima identificada seja feita para terceiros não enquadrados na faixa de renda, DECLARA ter ciência do dever de observar, no instrumento de venda, o valor máximo de alienação da unidade, conforme estabelecido pelo artigo 6-A, do Decreto 63.130/2024, com a redação dada pelo Decreto 64.244/2025; o compromisso da destinação a terceiros enquadrados na renda familiar mensal, além do cumprimento de todas as exigências legais acima mencionadas.",
        ),
        Block::plain_paragraph(
            "DECLARA, também, que observará as formalidades para alienação da unidade previstas no Decreto 63.130/2024 e se obriga a informar aos sucessores a respeito da destinação da unidade autônoma, para pessoa física que se enquadre na faixa de renda mensal familiar prevista no referido Decreto e demais legislações aplicáveis em vigor.",
        ),
        Block::plain_paragraph(format!(
            "Por fim, {} o consentimento a todos os termos e condições estipulados no CONTRATO PARTICULAR DE PROMESSA DE COMPRA E VENDA DE IMÓVEL EM CONSTRUÇÃO, incluindo o Quadro Resumo e as Cláusulas e Condições Gerais.",
            forms.ratify
        )),
        Block::plain_paragraph(format!(
            "Por ser expressão da verdade, {} o presente. Nada mais.",
            forms.sign
        )),
        Block::Closing {
            place_date: format!("{}.", context.place_date()),
            alignment: Alignment::Left,
            signatories,
            note: Some(acquisition_note(context)),
        },
    ])
}

fn party_identity(party: &Party) -> Vec<Span> {
    vec![
        Span::emphasis(or_placeholder(&party.name, BLANK_NAME)),
        Span::plain(format!(
            ", portador do RG nº {} e CPF nº {}",
            or_placeholder(&party.state_id, BLANK_ID),
            or_placeholder(&party.tax_id, BLANK_ID)
        )),
    ]
}

fn signatory_name(party: &Party, fallback: &str) -> String {
    or_placeholder(&party.name, fallback).to_uppercase()
}

fn acquisition_note(context: &Context<'_>) -> Vec<Span> {
    let project = context.project;
    let unit = &context.state.unit;

    let (kind, identifier) = if project.house_based {
        ("casa", or_placeholder(&unit.house_number, BLANK_UNIT))
    } else {
        ("unidade", or_placeholder(&unit.unit_number, BLANK_UNIT))
    };

    let mut note = vec![
        Span::plain(format!(
            "Nota: Este documento foi assinado para fins da aquisição da {kind} "
        )),
        Span::emphasis(identifier),
    ];
    let tower = unit.tower_name.trim();
    if !project.house_based && !tower.is_empty() {
        note.push(Span::plain(format!(" - Torre {tower}")));
    }
    note.extend([
        Span::plain(" do empreendimento "),
        Span::emphasis(project.name.clone()),
        Span::plain(", comercializada conforme "),
        Span::emphasis(project.address.clone()),
        Span::plain(" da matrícula "),
        Span::emphasis(context.effective_registry_number().to_string()),
        Span::plain(" do "),
        Span::emphasis(project.registry_office.clone()),
        Span::plain("."),
    ]);
    merge_spans(note)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
