//! Disciplinary proceeding (RDBM)

use crate::catalog::SignatureSpec;

pub fn signatures() -> Vec<SignatureSpec> {
    vec![
        SignatureSpec::new("Auto de Prisão em Flagrante")
            .legal_reference("RDBM Art. 89")
            .patterns([
                r"AUTO\s+DE\s+PRIS[ÃA]O\s+EM\s+FLAGRANTE",
                r"\bAPF\b",
            ])
            .keywords(["auto", "prisão", "flagrante", "conduzido"]),
        SignatureSpec::new("Portaria de instauração")
            .patterns([
                r"PORTARIA\s+DE\s+INSTAURA[ÇC][ÃA]O",
                r"INSTAURA[ÇC][ÃA]O\s+DE\s+PROCESSO\s+(?:ADMINISTRATIVO\s+)?DISCIPLINAR",
            ])
            .keywords(["portaria", "instauração", "disciplinar", "acusado"]),
        SignatureSpec::new("Termo de declarações do acusado")
            .patterns([
                r"TERMO\s+DE\s+(?:DECLARA[ÇC][ÕO]ES|INTERROGAT[ÓO]RIO)\s+DO\s+ACUSADO",
                r"INTERROGAT[ÓO]RIO\s+DO\s+ACUSADO",
            ])
            .keywords(["termo", "declarações", "acusado", "interrogatório"]),
        SignatureSpec::new("Oitiva das testemunhas")
            .patterns([
                r"OITIVA\s+DA?S?\s+TESTEMUNHAS?",
                r"TERMO\s+DE\s+(?:INQUIRI[ÇC][ÃA]O|DEPOIMENTO)\s+DE\s+TESTEMUNHA",
            ])
            .keywords(["oitiva", "testemunha", "compromisso", "depoimento"]),
        SignatureSpec::new("Defesa prévia")
            .patterns([
                r"DEFESA\s+PR[ÉE]VIA",
                r"ALEGA[ÇC][ÕO]ES\s+FINAIS\s+DE\s+DEFESA",
            ])
            .keywords(["defesa", "defensor", "alegações", "acusado"]),
        SignatureSpec::new("Relatório final")
            .patterns([
                r"RELAT[ÓO]RIO\s+FINAL",
                r"RELAT[ÓO]RIO\s+DO\s+PROCESSO\s+DISCIPLINAR",
            ])
            .keywords(["relatório", "final", "conclusão", "encarregado"]),
    ]
}
