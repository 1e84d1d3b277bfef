// Resume API: upload → extract → store, and analyze → score → respond.

pub mod handlers;
