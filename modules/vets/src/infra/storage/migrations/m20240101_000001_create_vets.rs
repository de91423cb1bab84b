use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Vets {
    Table,
    Id,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
enum Specialties {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum VetSpecialties {
    Table,
    VetId,
    SpecialtyId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vets::FirstName).string_len(30).not_null())
                    .col(ColumnDef::new(Vets::LastName).string_len(30).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Specialties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Specialties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Specialties::Name)
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
                    .table(VetSpecialties::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VetSpecialties::VetId).integer().not_null())
                    .col(
                        ColumnDef::new(VetSpecialties::SpecialtyId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(VetSpecialties::VetId)
                            .col(VetSpecialties::SpecialtyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vet_specialties_vet")
                            .from(VetSpecialties::Table, VetSpecialties::VetId)
                            .to(Vets::Table, Vets::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vet_specialties_specialty")
                            .from(VetSpecialties::Table, VetSpecialties::SpecialtyId)
                            .to(Specialties::Table, Specialties::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VetSpecialties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Specialties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vets::Table).to_owned())
            .await?;
        Ok(())
    }
}
