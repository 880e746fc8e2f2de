//! Contract record to block list.
//!
//! Fixed document shape: lender letterhead, centered title, an intro line
//! naming the parties, the seven numbered clauses, the place-and-date
//! line, and the two signature blocks (customer first, then the lender's
//! countersigned line).

use prestito_types::contract::ContractRecord;

use crate::blocks::{Block, SignatureBlock};

/// Customer signature line label.
pub const CUSTOMER_SIGNATURE_LABEL: &str = "Firma del Cliente:";
/// Lender signature line label; this line carries the signature image and
/// the stamp when those assets exist.
pub const LENDER_SIGNATURE_LABEL: &str = "Per l'Istituto:";

/// Build the ordered block list for one contract.
pub fn contract_blocks(record: &ContractRecord) -> Vec<Block> {
    let mut blocks = vec![
        Block::Heading(record.lender_name.clone()),
        Block::Paragraph(record.lender_registration.clone()),
        Block::Spacer(18.0),
        Block::Title(record.title.clone()),
        Block::Spacer(14.0),
        Block::Paragraph(format!(
            "Il presente contratto \u{e8} stipulato tra {} e il cliente {}, alle condizioni \
             che seguono.",
            record.lender_name, record.customer_name
        )),
        Block::Spacer(10.0),
    ];

    for clause in &record.clauses {
        blocks.push(Block::Heading(clause.title.clone()));
        blocks.push(Block::Paragraph(clause.body.clone()));
        blocks.push(Block::Spacer(8.0));
    }

    blocks.push(Block::Spacer(16.0));
    blocks.push(Block::Paragraph(format!(
        "Luogo e data: {}",
        record.place_and_date
    )));
    blocks.push(Block::Spacer(22.0));
    blocks.push(Block::Signature(SignatureBlock::plain(
        CUSTOMER_SIGNATURE_LABEL,
    )));
    blocks.push(Block::Spacer(12.0));
    blocks.push(Block::Signature(SignatureBlock::countersigned(
        LENDER_SIGNATURE_LABEL,
    )));

    blocks
}
