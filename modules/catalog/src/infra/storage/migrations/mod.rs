use sea_orm_migration::MigrationTrait;

mod initial_001;

pub fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![Box::new(initial_001::Migration)]
}
