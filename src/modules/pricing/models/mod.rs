mod item_economics;
mod price_quote;
mod regime_result;

pub use item_economics::ItemEconomics;
pub use price_quote::{BreakdownLine, DutyRegime, PriceQuote};
pub use regime_result::{Competitiveness, CouponStrategy, DualRegimeResult};
