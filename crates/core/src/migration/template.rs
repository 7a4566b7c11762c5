use super::engine::SchemaDiff;
use crate::error::{Error, Result};
use chrono::Utc;
use std::fmt::Write;

/// A migration name split into words, rendered for file and class names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationName {
    words: Vec<String>,
}

impl MigrationName {
    /// Split on separators and lower-to-upper case boundaries
    pub fn parse(input: &str) -> Result<Self> {
        let mut words = Vec::new();
        let mut current = String::new();
        let mut previous: Option<char> = None;

        for c in input.chars() {
            if !c.is_ascii_alphanumeric() {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                previous = None;
                continue;
            }
            let boundary = matches!(previous, Some(p) if (p.is_ascii_lowercase() || p.is_ascii_digit()) && c.is_ascii_uppercase());
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(c.to_ascii_lowercase());
            previous = Some(c);
        }
        if !current.is_empty() {
            words.push(current);
        }

        if words.is_empty() {
            return Err(Error::InvalidName(input.to_string()));
        }
        Ok(Self { words })
    }

    pub fn kebab(&self) -> String {
        self.words.join("-")
    }

    pub fn pascal(&self) -> String {
        self.words
            .iter()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect()
    }
}

/// A rendered migration source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub file_name: String,
    pub class_name: String,
    pub content: String,
}

impl MigrationFile {
    pub fn now(name: &MigrationName, diff: &SchemaDiff) -> Self {
        Self::render(name, diff, Utc::now().timestamp_millis())
    }

    /// `<millis>-<kebab-name>.ts` declaring `<PascalName><millis>`
    pub fn render(name: &MigrationName, diff: &SchemaDiff, timestamp_millis: i64) -> Self {
        let file_name = format!("{timestamp_millis}-{}.ts", name.kebab());
        let class_name = format!("{}{timestamp_millis}", name.pascal());

        let mut content = String::new();
        content.push_str("import { MigrationInterface, QueryRunner } from 'typeorm';\n\n");
        let _ = writeln!(
            content,
            "export class {class_name} implements MigrationInterface {{"
        );
        render_method(&mut content, "up", &diff.up);
        content.push('\n');
        render_method(&mut content, "down", &diff.down);
        content.push_str("}\n");

        Self {
            file_name,
            class_name,
            content,
        }
    }
}

fn render_method(out: &mut String, name: &str, statements: &[String]) {
    let _ = writeln!(
        out,
        "    public async {name}(queryRunner: QueryRunner): Promise<any> {{"
    );
    for statement in statements {
        let _ = writeln!(
            out,
            "        await queryRunner.query(`{}`, undefined);",
            escape_template_literal(statement)
        );
    }
    out.push_str("    }\n");
}

fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_forms() {
        let name = MigrationName::parse("add reviews_table").unwrap();
        assert_eq!(name.kebab(), "add-reviews-table");
        assert_eq!(name.pascal(), "AddReviewsTable");

        let camel = MigrationName::parse("addProductRating2").unwrap();
        assert_eq!(camel.kebab(), "add-product-rating2");
        assert_eq!(camel.pascal(), "AddProductRating2");

        let acronym = MigrationName::parse("SEO fields").unwrap();
        assert_eq!(acronym.kebab(), "seo-fields");
    }

    #[test]
    fn test_empty_name_is_invalid() {
        assert!(matches!(
            MigrationName::parse(" -_ "),
            Err(Error::InvalidName(_))
        ));
    }

    #[test]
    fn test_render_migration_file() {
        let diff = SchemaDiff {
            up: vec![
                r#"CREATE TABLE "review" ("id" SERIAL NOT NULL)"#.to_string(),
                "COMMENT ON COLUMN `x` IS '${y}'".to_string(),
            ],
            down: vec![r#"DROP TABLE "review""#.to_string()],
        };
        let file = MigrationFile::render(
            &MigrationName::parse("add reviews").unwrap(),
            &diff,
            1700000000000,
        );
        assert_eq!(file.file_name, "1700000000000-add-reviews.ts");
        assert_eq!(file.class_name, "AddReviews1700000000000");
        assert_eq!(
            file.content,
            r#"import { MigrationInterface, QueryRunner } from 'typeorm';

export class AddReviews1700000000000 implements MigrationInterface {
    public async up(queryRunner: QueryRunner): Promise<any> {
        await queryRunner.query(`CREATE TABLE "review" ("id" SERIAL NOT NULL)`, undefined);
        await queryRunner.query(`COMMENT ON COLUMN \`x\` IS '\${y}'`, undefined);
    }

    public async down(queryRunner: QueryRunner): Promise<any> {
        await queryRunner.query(`DROP TABLE "review"`, undefined);
    }
}
"#
        );
    }
}
