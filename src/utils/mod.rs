/**
* filename : mod
* author : HAMA
* date: 2025. 6. 14.
* description:
**/

pub mod logging;
pub mod math;
