use super::domain::{Category, CategoryCode, Project};
use super::emphasis::{emphasize, EMPHASIS_ALLOWLIST};

const REPRESENTATION: &str = "neste ato representada por seus procuradores: DIOGO ROSSI DE LIMA CANO, brasileiro, solteiro, arquiteto, RG nº 35.338.040-4 SSP/SP e CPF nº 367.679.408-79; e/ou JOÃO VICTOR MICHEL, brasileiro, casado, maior, supervisor de registro, RG nº 32.408.233-2 SSP/SP, CPF nº 214.297.848-73; e/ou JULIA DE OLIVEIRA LONGUINI, brasileira, solteira, maior, supervisora de repasse, RG nº 50.775.145-0 SSP/SP, CPF nº 129.265.416-35; conforme procuração lavrada em 23/01/2025, Folhas 164 a 170, do Livro 861-P, do Tabelionato de Notas e Registro Civil das Pessoas Naturais de Venda Nova; todos com endereço comercial à Rua Goncalves Dias, 744, Savassi, Belo Horizonte/MG.";

// The Jundiaí power of attorney cites the notary with its full registry name.
const REPRESENTATION_JUNDIAI: &str = "neste ato representada por seus procuradores: DIOGO ROSSI DE LIMA CANO, brasileiro, solteiro, arquiteto, RG nº 35.338.040-4 SSP/SP e CPF nº 367.679.408-79; e/ou JOÃO VICTOR MICHEL, brasileiro, casado, maior, supervisor de registro, RG nº 32.408.233-2 SSP/SP, CPF nº 214.297.848-73; e/ou JULIA DE OLIVEIRA LONGUINI, brasileira, solteira, maior, supervisora de repasse, RG nº 50.775.145-0 SSP/SP, CPF nº 129.265.416-35; conforme procuração lavrada em 23/01/2025, Folhas 164 a 170, do Livro 861-P, do Cartório do Tabelionato de Notas e Registro Civil das Pessoas Naturais de Venda Nova/MG; todos com endereço comercial à Rua Goncalves Dias, 744, Savassi, Belo Horizonte/MG";

struct ProjectSeed {
    id: &'static str,
    name: &'static str,
    legal_entity: &'static str,
    tax_id: &'static str,
    registry_office: &'static str,
    registry_number: &'static str,
    is_parent_registry: bool,
    house_based: bool,
    entity_header: &'static str,
    representation: &'static str,
    city: &'static str,
    address: &'static str,
}

impl ProjectSeed {
    fn build(&self) -> Project {
        let qualification = format!("{}{}", self.entity_header, self.representation);
        Project {
            id: self.id.to_string(),
            name: self.name.to_string(),
            legal_entity: self.legal_entity.to_string(),
            tax_id: self.tax_id.to_string(),
            registry_office: self.registry_office.to_string(),
            registry_number: self.registry_number.to_string(),
            is_parent_registry: self.is_parent_registry,
            house_based: self.house_based,
            qualification: emphasize(&qualification, &EMPHASIS_ALLOWLIST),
            city: self.city.to_string(),
            address: self.address.to_string(),
        }
    }
}

const SEEDS: [ProjectSeed; 9] = [
    ProjectSeed {
        id: "altus",
        name: "Altus Vila Prudente",
        legal_entity: "EMCCAMP INCORPORAÇÃO SC 16 SPE LTDA",
        tax_id: "40.733.116/0001-54",
        registry_office: "06° Oficial de Registro de Imóveis da Comarca de São Paulo",
        registry_number: "265.935",
        is_parent_registry: false,
        house_based: false,
        entity_header: "EMCCAMP INCORPORAÇÃO SC 16 SPE LTDA., com sede em Belo Horizonte/MG, na Rua Gonçalves Dias nº 744, sala 31, no bairro Savassi, Belo Horizonte/MG, inscrita no CNPJ 40.733.116/0001-54, conforme documentos constitutivos arquivados na Junta Comercial do Estado de Minas Gerais em 21/05/2024, registrada sob NIRE nº 31212083924, ",
        representation: REPRESENTATION,
        city: "São Paulo",
        address: "Rua Marcello Muller, 200 - Bairro Jardim Independência",
    },
    ProjectSeed {
        id: "origem",
        name: "Origem Itaquera",
        legal_entity: "EMCCAMP INCORPORAÇÃO SC 21 SPE LTDA",
        tax_id: "43.614.892/0001-23",
        registry_office: "9° Oficial de Registro de Imóveis da Comarca de São Paulo",
        registry_number: "381.053",
        is_parent_registry: true,
        house_based: false,
        entity_header: "EMCCAMP INCORPORAÇÃO SC 21 SPE LTDA., com sede em Belo Horizonte/MG, na Rua Gonçalves Dias nº 744, sala 36, no bairro Funcionários, Belo Horizonte/MG, inscrita no CNPJ 43.614.892/0001-23, conforme documentos constitutivos arquivados na Junta Comercial do Estado de Minas Gerais em 16/05/2025 sob o nº 12816497, registrada sob NIRE nº 31212549524, ",
        representation: REPRESENTATION,
        city: "São Paulo",
        address: "Rua Agrimensor Sugaya nº 842 - Bairro Colônia",
    },
    ProjectSeed {
        id: "serena",
        name: "Serena Residence",
        legal_entity: "EMCCAMP INCORPORAÇÃO SC 34 SPE LTDA",
        tax_id: "54.110.059/0001-61",
        registry_office: "12° Oficial de Registro de Imóveis da Comarca de São Paulo",
        registry_number: "222.681",
        is_parent_registry: true,
        house_based: false,
        entity_header: "EMCCAMP INCORPORAÇÃO SC 34 SPE LTDA., com sede em Belo Horizonte/MG, na Rua Gonçalves Dias nº 744, sala 49, no bairro Funcionários, Belo Horizonte/MG, inscrita no CNPJ 54.110.059/0001-61, conforme documentos constitutivos arquivados na Junta Comercial do Estado de Minas Gerais em 28/02/2024, registrada sob NIRE nº 31214916583, ",
        representation: REPRESENTATION,
        city: "São Paulo",
        address: "Rua Nova Itarana nº 55 - Bairro Vila Silvia",
    },
    ProjectSeed {
        id: "vision",
        name: "Vision Penha",
        legal_entity: "EMCCAMP INCORPORAÇÃO SC 08 SPE LTDA",
        tax_id: "37.665.998/0001-53",
        registry_office: "12° Oficial de Registro de Imóveis da Comarca de São Paulo",
        registry_number: "252.931",
        is_parent_registry: true,
        house_based: false,
        entity_header: "EMCCAMP INCORPORAÇÃO SC 08 SPE LTDA., com sede em Belo Horizonte/MG, na Rua Gonçalves Dias nº 744, sala 20, no bairro Funcionários, Belo Horizonte/MG, inscrita no CNPJ 37.665.998/0001-53, conforme documentos constitutivos arquivados na Junta Comercial do Estado de Minas Gerais em 09/07/2020, registrada sob NIRE nº 31211752954, ",
        representation: REPRESENTATION,
        city: "São Paulo",
        address: "Av. Amador Bueno da Veiga nº 1127 - Bairro Penha de França",
    },
    ProjectSeed {
        id: "iconico",
        name: "Icônico Jaraguá",
        legal_entity: "EMCCAMP INCORPORAÇÃO SC 32 SPE LTDA",
        tax_id: "44.763.499/0001-64",
        registry_office: "18° Oficial de Registro de Imóveis da Comarca de São Paulo",
        registry_number: "301.154",
        is_parent_registry: true,
        house_based: false,
        entity_header: "EMCCAMP INCORPORAÇÃO SC 32 SPE LTDA., com sede em Belo Horizonte/MG, na Rua Gonçalves Dias nº 744, sala 49, no bairro Funcionários, Belo Horizonte/MG, inscrita no CNPJ 44.763.499/0001-64, conforme documentos constitutivos arquivados na Junta Comercial do Estado de Minas Gerais em 25/06/2024, registrada sob NIRE nº 31212771944, ",
        representation: REPRESENTATION,
        city: "São Paulo",
        address: "Rua Camocim de São Felix nº 38 - Bairro Jaraguá",
    },
    ProjectSeed {
        id: "line",
        name: "L1ne Parada Inglesa",
        legal_entity: "EMCCAMP INCORPORAÇÃO SC 35 SPE LTDA",
        tax_id: "54.109.242/0001-47",
        registry_office: "03° Oficial de Registro de Imóveis da Comarca de São Paulo",
        registry_number: "173.197",
        is_parent_registry: true,
        house_based: false,
        entity_header: "EMCCAMP INCORPORAÇÃO SC 35 SPE LTDA., com sede em Belo Horizonte/MG, na Rua Gonçalves Dias nº 744, sala 52, no bairro Funcionários, Belo Horizonte/MG, inscrita no CNPJ 54.109.242/0001-47, conforme documentos constitutivos arquivados na Junta Comercial do Estado de Minas Gerais em 07/07/2025 sob o nº 12864183, registrada sob NIRE nº 31214916371, ",
        representation: REPRESENTATION,
        city: "São Paulo",
        address: "Rua do Tramway, nº 103 - Bairro Tucuruvi",
    },
    ProjectSeed {
        id: "nostro",
        name: "Nostro Mooca",
        legal_entity: "EMCCAMP INCORPORACAO SC 14 SPE LTDA",
        tax_id: "39.313.768/0001-50",
        registry_office: "07° Oficial de Registro de Imóveis da Comarca de São Paulo",
        registry_number: "203.478",
        is_parent_registry: false,
        house_based: false,
        entity_header: "EMCCAMP INCORPORACAO SC 14 SPE LTDA., inscrita no CNPJ 39.313.768/0001-50, situada à Rua Goncalves Dias, 744, Savassi, Belo Horizonte/MG, com seus atos constitutivos arquivados na Junta Comercial do Estado de Minas Gerais em 20/06/2023, registrada sob NIRE nº 31211884231, ",
        representation: REPRESENTATION,
        city: "São Paulo",
        address: "Rua da Mooca, nº 1678 - Mooca",
    },
    ProjectSeed {
        id: "villagio",
        name: "Villagio dos Eucaliptos",
        legal_entity: "EMCCAMP INCORPORACAO SC 22 SPE LTDA",
        tax_id: "43.614.993/0001-02",
        registry_office: "01° Oficial de Registro de Imóveis, Títulos e Documentos e Civil de Pessoas Jurídicas de Jundiaí",
        registry_number: "196.285",
        is_parent_registry: true,
        house_based: true,
        entity_header: "EMCCAMP INCORPORACAO SC 22 SPE LTDA., com sede em Belo Horizonte/MG, na Rua Gonçalves Dias nº 744, Sala 37, no bairro Funcionários, Belo Horizonte/MG, inscrita no CNPJ 43.614.993/0001-02, conforme documentos constitutivos arquivados na Junta Comercial do Estado de Minas Gerais em 28/04/2025, registrada sob NIRE nº 31212549575, ",
        representation: REPRESENTATION_JUNDIAI,
        city: "Jundiaí",
        address: "Rua Primo Porcari esquina com Rua Alfredo Abaid - Bairro Medeiros",
    },
    ProjectSeed {
        id: "soul",
        name: "Soul Imigrantes",
        legal_entity: "EMCCAMP INCORPORACAO SC 09 SPE LTDA",
        tax_id: "37.667.467/0001-08",
        registry_office: "Oficial de Registro de Imóveis de Diadema",
        registry_number: "76.961",
        is_parent_registry: true,
        house_based: false,
        entity_header: "EMCCAMP INCORPORACAO SC 09 SPE LTDA., inscrita no CNPJ 37.667.467/0001-08, situada à Rua Goncalves Dias, 744, Savassi, Belo Horizonte/MG, com seus atos constitutivos arquivados na Junta Comercial do Estado de Minas Gerais em 09/07/2020, registrada sob NIRE nº 3121175306-3, ",
        representation: REPRESENTATION,
        city: "Diadema",
        address: "Rua Annita, nº 225 - Bairro Canhema",
    },
];

pub(crate) fn projects() -> Vec<Project> {
    SEEDS.iter().map(ProjectSeed::build).collect()
}

pub(crate) fn categories() -> Vec<Category> {
    vec![
        Category {
            code: CategoryCode::His1,
            label: "HIS-1".to_string(),
            full_label: "HABITAÇÃO DE INTERESSE SOCIAL (HIS-1)".to_string(),
            income_range_text: "inferior a R$4.700,00".to_string(),
            value_limit: 264_000,
        },
        Category {
            code: CategoryCode::His2,
            label: "HIS-2".to_string(),
            full_label: "HABITAÇÃO DE INTERESSE SOCIAL (HIS-2)".to_string(),
            income_range_text: "inferior a R$4.700,01 X R$8.600,00".to_string(),
            value_limit: 350_000,
        },
        Category {
            code: CategoryCode::Hmp,
            label: "HMP".to_string(),
            full_label: "HABITAÇÃO DE MERCADO POPULAR (HMP)".to_string(),
            income_range_text: "inferior a R$8.600,01 X R$12.000,00".to_string(),
            value_limit: 500_000,
        },
    ]
}
