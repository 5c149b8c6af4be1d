mod affordability;
mod common;
