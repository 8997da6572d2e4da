//! Special inquiry into an on-duty accident
//!
//! Sixteen documents make a complete file (NI 1.26 EMBM 23).

use crate::catalog::SignatureSpec;

pub fn signatures() -> Vec<SignatureSpec> {
    vec![
        SignatureSpec::new("Portaria da Sindicância Especial")
            .legal_reference("NI 1.26 Art. 5º")
            .patterns([
                r"PORTARIA\s+N?[º°O]?\s*\d+\s+SINDASV\s+\d{4}",
                r"INSTAURA[ÇC][ÃA]O\s+DE\s+SINDIC[ÂA]NCIA\s+ESPECIAL",
                r"DO\s+CMT\s+DO\s+\d+\s*°?\s*BPM.*?SINDIC[ÂA]NCIA\s+ESPECIAL",
            ])
            .keywords(["portaria", "sindicância", "especial", "instauração"])
            .reference_page(3),
        SignatureSpec::new("Parte de acidente")
            .patterns([
                r"PARTE\s+DE\s+ACIDENTE",
                r"COMUNICA[ÇC][ÃA]O\s+DE\s+ACIDENTE",
            ])
            .keywords(["parte", "acidente", "viatura", "ocorrência"]),
        SignatureSpec::new("Atestado de Origem")
            .patterns([r"ATESTADO\s+DE\s+ORIGEM"])
            .keywords(["atestado", "origem", "lesão", "serviço"])
            .reference_page(17),
        SignatureSpec::new("Primeiro Boletim de atendimento médico")
            .legal_reference("Decreto 32.280 Art. 12")
            .patterns([
                r"BOLETIM\s+DE\s+ATENDIMENTO\s+M[ÉE]DICO",
                r"PRIMEIRO\s+BOLETIM\s+M[ÉE]DICO",
                r"BOLETIM\s+DE\s+PRIMEIRO\s+ATENDIMENTO",
            ])
            .keywords(["boletim", "atendimento", "médico", "paciente", "diagnóstico"]),
        SignatureSpec::new("Escala de serviço")
            .patterns([r"ESCALA\s+DE\s+SERVI[ÇC]O"])
            .keywords(["escala", "serviço", "turno", "efetivo"]),
        SignatureSpec::new("Ata de Habilitação para conduzir viatura")
            .patterns([
                r"ATA\s+DE\s+HABILITA[ÇC][ÃA]O",
                r"HABILITA[ÇC][ÃA]O\s+PARA\s+CONDUZIR\s+VIATURA",
            ])
            .keywords(["ata", "habilitação", "conduzir", "viatura"]),
        SignatureSpec::new("Documentação operacional")
            .patterns([
                r"DOCUMENTA[ÇC][ÃA]O\s+OPERACIONAL",
                r"RELAT[ÓO]RIO\s+OPERACIONAL",
            ])
            .keywords(["operacional", "missão", "guarnição", "ocorrência"]),
        SignatureSpec::new("Inquérito Técnico")
            .patterns([r"INQU[ÉE]RITO\s+T[ÉE]CNICO"])
            .keywords(["inquérito", "técnico", "perícia", "viatura"]),
        SignatureSpec::new("CNH")
            .patterns([
                r"CARTEIRA\s+NACIONAL\s+DE\s+HABILITA[ÇC][ÃA]O",
                r"\bCNH\b",
            ])
            .keywords(["habilitação", "categoria", "validade", "registro", "detran"]),
        SignatureSpec::new("Formulário previsto na Portaria 095/SSP/15")
            .legal_reference("Portaria 095/SSP/15")
            .patterns([
                r"PORTARIA\s+N?[º°O]?\s*0?95\s+SSP\s+(?:20)?15",
                r"FORMUL[ÁA]RIO\s+.*PORTARIA\s+N?[º°O]?\s*0?95",
            ])
            .keywords(["formulário", "portaria", "ssp"]),
        SignatureSpec::new("Oitiva do acidentado")
            .patterns([
                r"OITIVA\s+DO\s+ACIDENTADO",
                r"TERMO\s+DE\s+DECLARA[ÇC][ÕO]ES\s+DO\s+ACIDENTADO",
            ])
            .keywords(["oitiva", "acidentado", "declarações", "termo"]),
        SignatureSpec::new("Oitiva das testemunhas")
            .patterns([
                r"OITIVA\s+DA?S?\s+TESTEMUNHAS?",
                r"TERMO\s+DE\s+(?:INQUIRI[ÇC][ÃA]O|DEPOIMENTO)\s+DE\s+TESTEMUNHA",
            ])
            .keywords(["oitiva", "testemunha", "compromisso", "depoimento"]),
        SignatureSpec::new("Parecer do Encarregado")
            .patterns([
                r"PARECER\s+DO\s+ENCARREGADO",
                r"RELAT[ÓO]RIO\s+DO\s+ENCARREGADO",
            ])
            .keywords(["parecer", "encarregado", "sindicância", "conclusão"]),
        SignatureSpec::new("Conclusão da Autoridade nomeante")
            .patterns([
                r"CONCLUS[ÃA]O\s+DA\s+AUTORIDADE\s+NOMEANTE",
                r"SOLU[ÇC][ÃA]O\s+DA\s+SINDIC[ÂA]NCIA",
            ])
            .keywords(["conclusão", "autoridade", "nomeante", "homologo"]),
        SignatureSpec::new("RHE").patterns([r"\bRHE\b"]),
        SignatureSpec::new("LTS").patterns([
            r"\bLTS\b",
            r"LICEN[ÇC]A\s+PARA\s+TRATAMENTO\s+DE\s+SA[ÚU]DE",
        ]),
    ]
}
