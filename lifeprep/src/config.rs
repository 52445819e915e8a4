use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub input_path: String,
    pub output_dir: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: "dataset/life expectancy.csv".into(),
            output_dir: "dataset/".into(),
            start_year: 2000,
            end_year: 2020,
        }
    }
}
