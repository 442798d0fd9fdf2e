/**
* filename : mod
* author : HAMA
* date: 2025. 6. 14.
* description:
**/

pub mod calendar;
pub mod client;
pub mod mocks;
pub mod normalizer;
pub mod symbol;
