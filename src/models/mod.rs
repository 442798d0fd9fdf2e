/**
* filename : mod
* author : HAMA
* date: 2025. 6. 14.
* description:
**/

pub mod market;
pub mod snapshot;
