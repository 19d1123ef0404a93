mod bank;
mod records;

pub use bank::{BankLoadError, load_question_bank, parse_question_bank};
pub use records::FileRecordStore;
