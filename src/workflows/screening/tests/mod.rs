mod common;
mod evaluation;
mod synthesis;
