//! This module stores the canonical column names of the observation table,
//! together with the rename table mapping the raw World Bank export headers
//! onto them. Note that the rename table must be synchronised with the fixed
//! header of the input file!

pub const COUNTRY: &str = "country";
pub const COUNTRY_CODE: &str = "country_code";
pub const REGION: &str = "region";
pub const INCOME_GROUP: &str = "income_group";
pub const YEAR: &str = "year";

pub const LIFE_EXPECTANCY: &str = "life_expectancy";
pub const UNDERNOURISHMENT: &str = "undernourishment";
pub const CO2: &str = "co2";
pub const HEALTH_EXP_PCT: &str = "health_exp_pct";
pub const EDUCATION_EXP_PCT: &str = "education_exp_pct";
pub const UNEMPLOYMENT: &str = "unemployment";
pub const CORRUPTION: &str = "corruption";
pub const SANITATION: &str = "sanitation";
pub const INJURIES: &str = "injuries";
pub const COMMUNICABLE: &str = "communicable";
pub const NON_COMMUNICABLE: &str = "non_communicable";

// Columns added by the advanced feature pipeline
pub const LIFE_EXPECTANCY_INTERP: &str = "life_expectancy_interp";
pub const LIFE_EXPECTANCY_WAS_INTERPOLATED: &str = "life_expectancy_was_interpolated";
pub const DISEASE_BURDEN_RATIO: &str = "disease_burden_ratio";
pub const LIFE_EXPECTANCY_5YR_AVG: &str = "life_expectancy_5yr_avg";

// Columns of the missing-value report
pub const VARIABLE: &str = "variable";
pub const MISSING_RATIO: &str = "missing_ratio";

/// Raw header name → canonical name, in source column order.
pub const SOURCE_RENAMES: [(&str, &str); 16] = [
    ("Country Name", COUNTRY),
    ("Country Code", COUNTRY_CODE),
    ("Region", REGION),
    ("IncomeGroup", INCOME_GROUP),
    ("Year", YEAR),
    ("Life Expectancy World Bank", LIFE_EXPECTANCY),
    ("Prevelance of Undernourishment", UNDERNOURISHMENT),
    ("CO2", CO2),
    ("Health Expenditure %", HEALTH_EXP_PCT),
    ("Education Expenditure %", EDUCATION_EXP_PCT),
    ("Unemployment", UNEMPLOYMENT),
    ("Corruption", CORRUPTION),
    ("Sanitation", SANITATION),
    ("Injuries", INJURIES),
    ("Communicable", COMMUNICABLE),
    ("NonCommunicable", NON_COMMUNICABLE),
];

/// The nullable numeric indicator columns, coerced to `Float64` during
/// cleaning. Missingness in these is preserved in the base dataset.
pub const NUMERIC_INDICATORS: [&str; 11] = [
    LIFE_EXPECTANCY,
    UNDERNOURISHMENT,
    CO2,
    HEALTH_EXP_PCT,
    EDUCATION_EXP_PCT,
    UNEMPLOYMENT,
    CORRUPTION,
    SANITATION,
    INJURIES,
    COMMUNICABLE,
    NON_COMMUNICABLE,
];

/// A row missing any of these is invalid for every downstream use and is
/// dropped during cleaning.
pub const CRITICAL_FIELDS: [&str; 3] = [LIFE_EXPECTANCY, REGION, INCOME_GROUP];
