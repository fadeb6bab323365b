//! Sample authorship data shared by the integration tests

/// Email addresses as they appear in commit and paper metadata
pub const EMAILS: &[&str] = &[
    "dradenoy@ybb.ne.jp",
    "t3hirano@nodai.ac.jp",
    "kaya@nih.go.jp",
    "tkunieda@okayama-u.ac.jp",
    "rqkspine1@aol.com",
    "tb1@nibmg.ac.in",
    "bb2@nibmg.ac.in",
    "marbu@unam.mx",
    "alydan@hotmail.com",
    "acmusa23@yahoo.com.br",
    "rafaelquadros13@hotmail.com",
    "michelli_quimifarm@yahoo.com.br",
    "rogeriosst@gmail.com",
    "jrvieira@ufpa.br",
    "percario@ufpa.br",
    "spercario49@gmail.com",
    "poda@mail.med.upenn.edu",
];

/// Candidate names seen in the same dataset, including a blank and a duplicate
pub const NAMES: &[&str] = &[
    " ",
    "Reginald Q Knight",
    "Taniya Bardhan",
    "Bornali Bhattacharjee",
    "Kazuhiro Yoneda",
    "Yasuhiro KAWAI",
    "Takashi HIRANO",
    "Yasuhiro KAWAI",
    "Taishi KANII",
    "Tetsuo KUNIEDA",
    "Martha Irene Bucio Torres",
    "PAZ MAR&IACUTE",
    "Danilo Reymão Moreira",
    "Ana Carolina Musa Gonçalves Uberti",
    "Antonio Rafael Quadros Gomes",
    "Michelli Erica Souza Ferreira",
    "Rogério Silva Santos",
    "Michael Dean Green",
    "José Ricardo dos Santos Vieira",
    "Maria Fani Dolabela",
    "Sandro Percário",
    "Daniel J. Powell",
];
