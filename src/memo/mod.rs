/*!
 * Memo Table
 * Shared, fixed-capacity history of prior walks
 */

mod encoding;
mod table;

pub use encoding::MemoEncoding;
pub use table::{MemoTable, SlotUpdate};
