pub mod city;
pub mod result;
pub mod salary;

pub use city::{CityStandard, NewCityStandard};
pub use result::{ContributionResult, NewContributionResult};
pub use salary::{NewSalaryRecord, SalaryRecord};
