use sea_orm_migration::prelude::*;

const PET_TYPES: [&str; 6] = ["cat", "dog", "lizard", "snake", "bird", "hamster"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Owners {
    Table,
    Id,
    FirstName,
    LastName,
    Address,
    City,
    Telephone,
}

#[derive(DeriveIden)]
enum PetTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Pets {
    Table,
    Id,
    Name,
    BirthDate,
    TypeId,
    OwnerId,
}

#[derive(DeriveIden)]
enum Visits {
    Table,
    Id,
    PetId,
    VisitDate,
    Description,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Owners::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Owners::FirstName).string_len(30).not_null())
                    .col(ColumnDef::new(Owners::LastName).string_len(30).not_null())
                    .col(ColumnDef::new(Owners::Address).string_len(255).not_null())
                    .col(ColumnDef::new(Owners::City).string_len(80).not_null())
                    .col(ColumnDef::new(Owners::Telephone).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_owners_last_name")
                    .table(Owners::Table)
                    .col(Owners::LastName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PetTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PetTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PetTypes::Name)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pets::Name).string_len(30).not_null())
                    .col(ColumnDef::new(Pets::BirthDate).date().not_null())
                    .col(ColumnDef::new(Pets::TypeId).integer().not_null())
                    .col(ColumnDef::new(Pets::OwnerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pets_owner")
                            .from(Pets::Table, Pets::OwnerId)
                            .to(Owners::Table, Owners::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pets_type")
                            .from(Pets::Table, Pets::TypeId)
                            .to(PetTypes::Table, PetTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visits::PetId).integer().not_null())
                    .col(ColumnDef::new(Visits::VisitDate).date().not_null())
                    .col(ColumnDef::new(Visits::Description).string_len(255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_pet")
                            .from(Visits::Table, Visits::PetId)
                            .to(Pets::Table, Pets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(PetTypes::Table).columns([PetTypes::Name]);
        for name in PET_TYPES {
            insert
                .values([name.into()])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PetTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Owners::Table).to_owned())
            .await?;
        Ok(())
    }
}
