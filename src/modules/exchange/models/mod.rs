mod exchange_quote;

pub use exchange_quote::ExchangeQuote;
