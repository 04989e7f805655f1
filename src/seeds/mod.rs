pub mod categories_seed;
