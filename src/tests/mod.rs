#[cfg(test)]
mod analysis_test;
