use crate::config::DbPool;

use super::model::Company;

pub struct CompanyCrud {
    pool: DbPool,
}

impl CompanyCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, company: &Company) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO companies (id, user_id, name, email, phone, address)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&company.id)
        .bind(&company.user_id)
        .bind(&company.name)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Company>, sqlx::Error> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }

    pub async fn email_taken_by_other(
        &self,
        email: &str,
        company_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM companies WHERE email = ? AND id != ?")
                .bind(email)
                .bind(company_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0 > 0)
    }

    pub async fn list(&self) -> Result<Vec<Company>, sqlx::Error> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Company>, sqlx::Error> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn update(&self, company: &Company) -> Result<(), sqlx::Error> {
        // user_id stays put: ownership is not transferable through updates.
        sqlx::query(
            r#"
            UPDATE companies
            SET name = ?, email = ?, phone = ?, address = ?
            WHERE id = ?
            "#,
        )
        .bind(&company.name)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.address)
        .bind(&company.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Rooms owned by the company are left in place (no cascade).
    pub async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM companies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
