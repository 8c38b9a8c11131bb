pub mod calculation;
pub mod city;
pub mod salary;
