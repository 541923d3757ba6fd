//! Interactive text menu over [`InventorySystem`].
//!
//! The loop owns no business rules: it reads a choice, calls the facade and
//! prints the outcome. Any failed action is reported and the loop continues.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use stockroom_inventory::{
    Decimal, DomainError, InventorySystem, NewProduct, Principal, ProductId, ProductPatch, Role,
};

use crate::render;

/// Why a single menu action did not complete.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Text that could not be parsed into the expected value.
    #[error("{0}")]
    Input(String),

    /// Input stream closed mid-action.
    #[error("end of input")]
    Eof,

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<R, W> {
    system: InventorySystem,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(system: InventorySystem, input: R, output: W) -> Self {
        Self {
            system,
            input,
            output,
        }
    }

    pub fn system(&self) -> &InventorySystem {
        &self.system
    }

    pub fn into_parts(self) -> (InventorySystem, W) {
        (self.system, self.output)
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let flow = match self.system.current_user().cloned() {
                None => self.anonymous_screen(),
                Some(principal) => self.user_screen(&principal),
            };

            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) | Err(ActionError::Eof) => break,
                Err(ActionError::Io(err)) => return Err(err.into()),
                Err(err) => self.report(&err)?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn anonymous_screen(&mut self) -> Result<Flow, ActionError> {
        writeln!(self.output, "\n=== Inventory Management System ===")?;
        writeln!(self.output, "1. Login")?;
        writeln!(self.output, "2. Exit")?;

        match self.ask("Enter your choice (1-2): ")?.trim() {
            "1" => {
                let username = self.ask("Username: ")?;
                let password = self.ask("Password: ")?;
                let principal = self.system.login(&username, &password)?;
                writeln!(self.output, "\nWelcome, {}!", principal.username)?;
            }
            "2" => {
                writeln!(self.output, "Goodbye!")?;
                return Ok(Flow::Exit);
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn user_screen(&mut self, principal: &Principal) -> Result<Flow, ActionError> {
        let is_admin = principal.is_admin();

        writeln!(
            self.output,
            "\n=== Welcome {} ({}) ===",
            principal.username, principal.role
        )?;
        writeln!(self.output, "1. View all products")?;
        writeln!(self.output, "2. Search products")?;
        writeln!(self.output, "3. View low stock products")?;
        if is_admin {
            writeln!(self.output, "4. Add product")?;
            writeln!(self.output, "5. Update product")?;
            writeln!(self.output, "6. Delete product")?;
        }
        writeln!(self.output, "7. Logout")?;
        if is_admin {
            writeln!(self.output, "8. Register user")?;
        }

        let choice = self.ask("Enter your choice: ")?;
        match (choice.trim(), is_admin) {
            ("1", _) => self.view_all()?,
            ("2", _) => self.search()?,
            ("3", _) => self.low_stock()?,
            ("4", true) => self.add()?,
            ("5", true) => self.update()?,
            ("6", true) => self.delete()?,
            ("7", _) => {
                self.system.logout();
                writeln!(self.output, "Logged out successfully!")?;
            }
            ("8", true) => self.register()?,
            _ => writeln!(self.output, "Invalid choice!")?,
        }
        Ok(Flow::Continue)
    }

    fn view_all(&mut self) -> Result<(), ActionError> {
        let lines: Vec<String> = self
            .system
            .list_products()?
            .into_iter()
            .map(render::product_line)
            .collect();
        self.print_list("Product List:", "No products found!", &lines)
    }

    fn search(&mut self) -> Result<(), ActionError> {
        let term = self.ask("Enter search term: ")?;
        let lines: Vec<String> = self
            .system
            .search_products(term.trim())?
            .into_iter()
            .map(render::search_line)
            .collect();
        self.print_list("Search Results:", "No products found!", &lines)
    }

    fn low_stock(&mut self) -> Result<(), ActionError> {
        let lines: Vec<String> = self
            .system
            .low_stock_products()?
            .into_iter()
            .map(render::low_stock_line)
            .collect();
        self.print_list("Low Stock Products:", "No low stock products!", &lines)
    }

    fn add(&mut self) -> Result<(), ActionError> {
        let name = self.ask("Product name: ")?;
        let category = self.ask("Category: ")?;
        let price = parse::<Decimal>(&self.ask("Price: ")?, "price")?;
        let stock = parse::<i64>(&self.ask("Initial stock: ")?, "stock quantity")?;

        let product = self
            .system
            .add_product(NewProduct::new(name, category, price, stock))?;
        writeln!(self.output, "Product added successfully! (ID: {})", product.id())?;
        Ok(())
    }

    fn update(&mut self) -> Result<(), ActionError> {
        let id = parse::<ProductId>(&self.ask("Enter product ID to update: ")?, "product ID")?;
        let name = self.ask("New name (press enter to skip): ")?;
        let category = self.ask("New category (press enter to skip): ")?;
        let price = self.ask("New price (press enter to skip): ")?;
        let stock = self.ask("New stock quantity (press enter to skip): ")?;

        let mut patch = ProductPatch::new();
        if !name.trim().is_empty() {
            patch = patch.name(name);
        }
        if !category.trim().is_empty() {
            patch = patch.category(category);
        }
        if !price.trim().is_empty() {
            patch = patch.price(parse::<Decimal>(&price, "price")?);
        }
        if !stock.trim().is_empty() {
            patch = patch.stock_quantity(parse::<i64>(&stock, "stock quantity")?);
        }

        self.system.update_product(id, &patch)?;
        writeln!(self.output, "Product updated successfully!")?;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), ActionError> {
        let id = parse::<ProductId>(&self.ask("Enter product ID to delete: ")?, "product ID")?;
        self.system.delete_product(id)?;
        writeln!(self.output, "Product deleted successfully!")?;
        Ok(())
    }

    fn register(&mut self) -> Result<(), ActionError> {
        let username = self.ask("New username: ")?;
        let password = self.ask("Password: ")?;
        let role = parse::<Role>(&self.ask("Role (Admin/User): ")?, "role")?;

        let record = self.system.register_user(&username, &password, role)?;
        writeln!(self.output, "User '{}' registered as {}.", record.username(), record.role())?;
        Ok(())
    }

    fn print_list(
        &mut self,
        heading: &str,
        empty: &str,
        lines: &[String],
    ) -> Result<(), ActionError> {
        if lines.is_empty() {
            writeln!(self.output, "{empty}")?;
            return Ok(());
        }
        writeln!(self.output, "\n{heading}")?;
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn report(&mut self, err: &ActionError) -> io::Result<()> {
        tracing::warn!(error = %err, "menu action failed");
        writeln!(self.output, "{}", render::error_message(err))
    }

    /// Prompt and read one line (without its terminator).
    fn ask(&mut self, label: &str) -> Result<String, ActionError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ActionError::Eof);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn parse<T: FromStr>(raw: &str, what: &str) -> Result<T, ActionError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ActionError::Input(format!("'{}' is not a valid {what}", raw.trim())))
}
