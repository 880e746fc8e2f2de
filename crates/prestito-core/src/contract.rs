//! Contract record assembly.
//!
//! Pure functions turning a completed loan into a render-ready
//! [`ContractRecord`]: filename derivation, the fixed lender identity, and
//! the seven boilerplate clauses with interpolated figures. No validation
//! happens here -- the conversation already validated every input -- and
//! no clocks are read: the contract date comes in as a parameter.

use chrono::{Datelike, NaiveDate};
use prestito_types::contract::{Clause, ContractRecord};
use prestito_types::money::{format_eur, format_percent};
use rust_decimal::Decimal;

/// Fixed counterparty on every contract.
pub const LENDER_NAME: &str = "Istituto di Credito Meridiano S.p.A.";

/// Registered-office line printed under the lender name.
pub const LENDER_REGISTRATION: &str =
    "Sede Legale: Via dei Tigli 12, 20121 Milano - P.IVA 09876543210";

/// Document title.
pub const CONTRACT_TITLE: &str = "Contratto di Prestito Personale";

/// City printed in the place-and-date line.
const CONTRACT_PLACE: &str = "Milano";

/// A fully-populated loan, ready for contract assembly.
///
/// Built by the engine at generation time from the session plus configured
/// defaults; by construction every field is present.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedLoan {
    pub customer_name: String,
    pub principal: Decimal,
    pub term_months: u32,
    pub nominal_rate: Decimal,
    pub apr: Decimal,
    pub monthly_payment: Decimal,
}

/// Derive the output filename from the customer name.
///
/// Spaces become underscores: `Mario Rossi` -> `Contratto_Mario_Rossi.pdf`.
pub fn contract_filename(customer_name: &str) -> String {
    format!("Contratto_{}.pdf", customer_name.trim().replace(' ', "_"))
}

/// Format a date the Italian way: `14 marzo 2025`.
pub fn format_date_it(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "gennaio",
        "febbraio",
        "marzo",
        "aprile",
        "maggio",
        "giugno",
        "luglio",
        "agosto",
        "settembre",
        "ottobre",
        "novembre",
        "dicembre",
    ];
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Assemble the immutable contract record.
pub fn build_contract_record(loan: &CompletedLoan, contract_date: NaiveDate) -> ContractRecord {
    let principal = format_eur(loan.principal);
    let payment = format_eur(loan.monthly_payment);
    let tan = format_percent(loan.nominal_rate);
    let taeg = format_percent(loan.apr);

    let clauses = vec![
        Clause {
            title: "1. Oggetto del contratto".to_string(),
            body: format!(
                "{LENDER_NAME} (di seguito \u{ab}l'Istituto\u{bb}) concede a {} \
                 (di seguito \u{ab}il Cliente\u{bb}) un prestito personale non finalizzato, \
                 regolato dalle condizioni riportate nel presente contratto.",
                loan.customer_name
            ),
        },
        Clause {
            title: "2. Importo e modalit\u{e0} di erogazione".to_string(),
            body: format!(
                "L'importo del prestito \u{e8} pari a {principal}. L'erogazione avviene in \
                 un'unica soluzione mediante bonifico sul conto corrente indicato dal Cliente, \
                 entro dieci giorni lavorativi dalla sottoscrizione."
            ),
        },
        Clause {
            title: "3. Durata e piano di rimborso".to_string(),
            body: format!(
                "Il rimborso avviene in n. {} rate mensili posticipate di {payment} ciascuna, \
                 addebitate il giorno 5 di ogni mese a partire dal mese successivo \
                 all'erogazione.",
                loan.term_months
            ),
        },
        Clause {
            title: "4. Tassi di interesse".to_string(),
            body: format!(
                "Al prestito si applica un Tasso Annuo Nominale (TAN) del {tan} e un Tasso \
                 Annuo Effettivo Globale (TAEG) del {taeg}, calcolati secondo la normativa \
                 vigente in materia di trasparenza bancaria."
            ),
        },
        Clause {
            title: "5. Spese e commissioni".to_string(),
            body: "Non sono previste spese di istruttoria n\u{e9} commissioni di incasso rata. \
                   Restano a carico del Cliente le imposte di bollo previste dalla legge."
                .to_string(),
        },
        Clause {
            title: "6. Recesso e rimborso anticipato".to_string(),
            body: "Il Cliente pu\u{f2} recedere dal contratto entro quattordici giorni dalla \
                   sottoscrizione, dandone comunicazione scritta all'Istituto. \u{c8} inoltre \
                   facolt\u{e0} del Cliente rimborsare anticipatamente, in tutto o in parte, il \
                   capitale residuo."
                .to_string(),
        },
        Clause {
            title: "7. Legge applicabile e foro competente".to_string(),
            body: "Il presente contratto \u{e8} regolato dalla legge italiana. Per ogni \
                   controversia \u{e8} competente il foro del luogo di residenza del Cliente."
                .to_string(),
        },
    ];

    ContractRecord {
        customer_name: loan.customer_name.clone(),
        lender_name: LENDER_NAME.to_string(),
        lender_registration: LENDER_REGISTRATION.to_string(),
        principal: loan.principal,
        term_months: loan.term_months,
        nominal_rate: loan.nominal_rate,
        apr: loan.apr,
        monthly_payment: loan.monthly_payment,
        contract_date,
        place_and_date: format!("{CONTRACT_PLACE}, {}", format_date_it(contract_date)),
        filename: contract_filename(&loan.customer_name),
        title: CONTRACT_TITLE.to_string(),
        clauses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_loan() -> CompletedLoan {
        CompletedLoan {
            customer_name: "Mario Rossi".to_string(),
            principal: dec("5000.00"),
            term_months: 36,
            nominal_rate: dec("7.86"),
            apr: dec("8.30"),
            monthly_payment: dec("156.36"),
        }
    }

    #[test]
    fn test_filename_replaces_spaces() {
        assert_eq!(
            contract_filename("Mario Rossi"),
            "Contratto_Mario_Rossi.pdf"
        );
        assert_eq!(
            contract_filename("  Anna Maria De Luca "),
            "Contratto_Anna_Maria_De_Luca.pdf"
        );
    }

    #[test]
    fn test_format_date_it() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(format_date_it(date), "14 marzo 2025");
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(format_date_it(date), "1 dicembre 2024");
    }

    #[test]
    fn test_record_has_seven_clauses() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let record = build_contract_record(&sample_loan(), date);
        assert_eq!(record.clauses.len(), 7);
        for (i, clause) in record.clauses.iter().enumerate() {
            assert!(
                clause.title.starts_with(&format!("{}.", i + 1)),
                "clause {} is misnumbered: {}",
                i,
                clause.title
            );
        }
    }

    #[test]
    fn test_figures_are_interpolated() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let record = build_contract_record(&sample_loan(), date);

        assert!(record.clauses[1].body.contains("€ 5.000,00"));
        assert!(record.clauses[2].body.contains("€ 156,36"));
        assert!(record.clauses[2].body.contains("n. 36 rate"));
        assert!(record.clauses[3].body.contains("7,86%"));
        assert!(record.clauses[3].body.contains("8,30%"));
        assert!(record.clauses[0].body.contains("Mario Rossi"));
    }

    #[test]
    fn test_record_metadata() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let record = build_contract_record(&sample_loan(), date);

        assert_eq!(record.filename, "Contratto_Mario_Rossi.pdf");
        assert_eq!(record.title, CONTRACT_TITLE);
        assert_eq!(record.lender_name, LENDER_NAME);
        assert_eq!(record.place_and_date, "Milano, 14 marzo 2025");
        assert_eq!(record.contract_date, date);
    }

    #[test]
    fn test_builder_is_deterministic() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let a = build_contract_record(&sample_loan(), date);
        let b = build_contract_record(&sample_loan(), date);
        assert_eq!(a, b);
    }
}
