pub mod m202601050001_create_users;
pub mod m202601050002_create_units;
pub mod m202601050003_create_members;
pub mod m202601050004_create_unit_counselors;
pub mod m202601120001_create_encounters;
pub mod m202601120002_create_presences;
