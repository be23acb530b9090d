//! # Text Console
//!
//! A line-oriented front-end for one customer. It reads commands from any async buffered
//! reader and writes plain text to a `std::io::Write`, so tests drive it with byte slices.
//!
//! ```text
//! catalog              list candies with stock status
//! add <id> [qty]       put a candy in the cart (qty defaults to 1)
//! remove <id>          take a candy out of the cart
//! cart                 show the cart and its total
//! checkout [percent]   place the order, optionally with a percentage discount
//! orders               list this customer's orders, or every order for an admin
//! help                 show this text
//! quit                 leave
//! ```

use crate::cart::ShoppingCart;
use crate::lifecycle::StoreSystem;
use crate::model::CandyId;
use crate::pricing::{DiscountCommand, PercentOff, PricingCommand, RegularPricing};
use crate::service::{OrderSummary, ReportError};
use actor_framework::ActorClient;
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const HELP: &str = "\
catalog              list candies with stock status
add <id> [qty]       put a candy in the cart
remove <id>          take a candy out of the cart
cart                 show the cart and its total
checkout [percent]   place the order, optionally with a percentage discount
orders               list your orders (all orders for admins)
help                 show this text
quit                 leave";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Catalog,
    Add { candy_id: CandyId, quantity: u32 },
    Remove(CandyId),
    Cart,
    /// Percentage as a whole number, `10` for 10% off.
    Checkout { percent_off: Option<u32> },
    Orders,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty line")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    Usage {
        command: &'static str,
        expected: &'static str,
    },
}

fn number<T: FromStr>(
    arg: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<T, ParseError> {
    arg.and_then(|a| a.parse().ok())
        .ok_or(ParseError::Usage { command, expected })
}

impl FromStr for ConsoleCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(ParseError::Empty);
        };
        let args: Vec<&str> = words.collect();
        let command = command.to_lowercase();
        let parsed = match (command.as_str(), args.as_slice()) {
            ("catalog", []) => ConsoleCommand::Catalog,
            ("add", [id]) | ("add", [id, _]) => {
                let expected = "a candy id and an optional quantity of at least 1";
                let quantity = match args.get(1).copied() {
                    Some(qty) => number(Some(qty), "add", expected)?,
                    None => 1,
                };
                if quantity == 0 {
                    return Err(ParseError::Usage {
                        command: "add",
                        expected,
                    });
                }
                ConsoleCommand::Add {
                    candy_id: CandyId(number(Some(*id), "add", expected)?),
                    quantity,
                }
            }
            ("remove", [id]) => {
                ConsoleCommand::Remove(CandyId(number(Some(*id), "remove", "a candy id")?))
            }
            ("cart", []) => ConsoleCommand::Cart,
            ("checkout", []) => ConsoleCommand::Checkout { percent_off: None },
            ("checkout", [percent]) => {
                let expected = "an optional percentage between 0 and 100";
                let percent: u32 = number(Some(*percent), "checkout", expected)?;
                if percent > 100 {
                    return Err(ParseError::Usage {
                        command: "checkout",
                        expected,
                    });
                }
                ConsoleCommand::Checkout {
                    percent_off: Some(percent),
                }
            }
            ("orders", []) => ConsoleCommand::Orders,
            ("help", _) | ("?", _) => ConsoleCommand::Help,
            ("quit", []) | ("exit", []) => ConsoleCommand::Quit,
            ("catalog" | "cart" | "orders" | "quit" | "exit", _) => {
                return Err(ParseError::Usage {
                    command: "this command",
                    expected: "no arguments",
                })
            }
            ("add", _) => {
                return Err(ParseError::Usage {
                    command: "add",
                    expected: "a candy id and an optional quantity",
                })
            }
            ("remove", _) => {
                return Err(ParseError::Usage {
                    command: "remove",
                    expected: "a candy id",
                })
            }
            ("checkout", _) => {
                return Err(ParseError::Usage {
                    command: "checkout",
                    expected: "at most one percentage",
                })
            }
            (other, _) => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(parsed)
    }
}

/// One customer's session: the cart lives here, everything else goes through the store.
pub struct Console<'a> {
    system: &'a StoreSystem,
    customer: String,
    cart: ShoppingCart,
}

impl<'a> Console<'a> {
    pub fn new(system: &'a StoreSystem, customer: impl Into<String>) -> Self {
        Self {
            system,
            customer: customer.into(),
            cart: ShoppingCart::new(),
        }
    }

    pub fn cart(&self) -> &ShoppingCart {
        &self.cart
    }

    /// Reads commands until `quit` or end of input. Only I/O errors end the session early.
    pub async fn run<R, W>(&mut self, reader: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "Welcome, {}. Type 'help' for commands.", self.customer)?;
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let command = match line.parse::<ConsoleCommand>() {
                Ok(command) => command,
                Err(ParseError::Empty) => continue,
                Err(e) => {
                    writeln!(out, "error: {}", e)?;
                    continue;
                }
            };
            debug!(?command, customer = %self.customer, "Console command");
            if command == ConsoleCommand::Quit {
                writeln!(out, "Goodbye!")?;
                break;
            }
            if let Err(e) = self.execute(command, out).await {
                match e {
                    CommandError::Io(e) => return Err(e),
                    other => writeln!(out, "error: {}", other)?,
                }
            }
        }
        out.flush()
    }

    async fn execute<W: Write>(
        &mut self,
        command: ConsoleCommand,
        out: &mut W,
    ) -> Result<(), CommandError> {
        match command {
            ConsoleCommand::Catalog => {
                for item in self.system.inventory.inventory().await.map_err(ReportError::from)? {
                    let candy = &item.candy;
                    writeln!(
                        out,
                        "{:>3}  {:<16} {:<10} ${:>6.2}  {:>4}  {}",
                        candy.id.0,
                        candy.name,
                        candy.kind.display_name(),
                        candy.price,
                        candy.quantity,
                        item.status
                    )?;
                }
            }
            ConsoleCommand::Add { candy_id, quantity } => {
                let candy = self
                    .system
                    .inventory
                    .get(candy_id)
                    .await
                    .map_err(ReportError::from)?
                    .ok_or(CommandError::NoSuchCandy(candy_id))?;
                let in_cart: u32 = self
                    .cart
                    .lines()
                    .iter()
                    .filter(|line| line.candy_id == candy_id)
                    .map(|line| line.quantity)
                    .sum();
                if in_cart.saturating_add(quantity) > candy.quantity {
                    writeln!(out, "Only {} {} in stock.", candy.quantity, candy.name)?;
                    return Ok(());
                }
                let name = candy.name.clone();
                self.cart
                    .add_item(candy, None, quantity)
                    .map_err(|e| CommandError::Cart(e.to_string()))?;
                writeln!(out, "Added {} x{}.", name, quantity)?;
            }
            ConsoleCommand::Remove(candy_id) => {
                if self.cart.remove_item(candy_id) {
                    writeln!(out, "Removed {}.", candy_id)?;
                } else {
                    writeln!(out, "{} is not in the cart.", candy_id)?;
                }
            }
            ConsoleCommand::Cart => {
                if self.cart.is_empty() {
                    writeln!(out, "Your cart is empty.")?;
                    return Ok(());
                }
                for line in self.cart.lines() {
                    writeln!(
                        out,
                        "{:<28} x{:<3} ${:>7.2}",
                        line.description(),
                        line.quantity,
                        line.line_total()
                    )?;
                    if let Some(package) = &line.package {
                        writeln!(out, "    {}", package.pack(&line.candy))?;
                    }
                }
                writeln!(out, "Total: ${:.2}", RegularPricing.quote(&self.cart))?;
            }
            ConsoleCommand::Checkout { percent_off } => {
                let discounts: Vec<Box<dyn DiscountCommand>> = match percent_off {
                    Some(percent) if percent > 0 => {
                        vec![Box::new(PercentOff(f64::from(percent) / 100.0))]
                    }
                    _ => Vec::new(),
                };
                let order = self
                    .system
                    .checkout
                    .checkout(&self.customer, &mut self.cart, discounts)
                    .await
                    .map_err(ReportError::from)?;
                writeln!(
                    out,
                    "Order {} placed: {} item(s), total ${:.2} ({}).",
                    order.id,
                    order.item_count(),
                    order.grand_total(),
                    order.status
                )?;
            }
            ConsoleCommand::Orders => {
                let account = self
                    .system
                    .accounts
                    .get(self.customer.clone())
                    .await
                    .map_err(ReportError::from)?;
                // Admins see every order in the store.
                let summaries = if account.as_ref().is_some_and(|a| a.is_admin()) {
                    OrderSummary::for_all(&self.system.orders, &self.system.accounts).await?
                } else {
                    let email = account.map(|a| a.email).unwrap_or_default();
                    self.system
                        .orders
                        .orders_for_customer(&self.customer)
                        .await
                        .map_err(ReportError::from)?
                        .iter()
                        .map(|order| OrderSummary::new(order, email.clone()))
                        .collect()
                };
                if summaries.is_empty() {
                    writeln!(out, "No orders yet.")?;
                }
                for summary in &summaries {
                    writeln!(
                        out,
                        "{}  {}  {:<12} {:<11} ${:>7.2}  {}",
                        summary.id,
                        summary.date(),
                        summary.customer,
                        summary.status_label(),
                        summary.total,
                        summary.items
                    )?;
                }
            }
            ConsoleCommand::Help => writeln!(out, "{}", HELP)?,
            ConsoleCommand::Quit => {}
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Store(#[from] ReportError),
    #[error("no candy with id {0}")]
    NoSuchCandy(CandyId),
    #[error("{0}")]
    Cart(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("catalog".parse(), Ok(ConsoleCommand::Catalog));
        assert_eq!(
            "  ADD 2 ".parse(),
            Ok(ConsoleCommand::Add {
                candy_id: CandyId(2),
                quantity: 1
            })
        );
        assert_eq!(
            "add 1 5".parse(),
            Ok(ConsoleCommand::Add {
                candy_id: CandyId(1),
                quantity: 5
            })
        );
        assert_eq!("remove 3".parse(), Ok(ConsoleCommand::Remove(CandyId(3))));
        assert_eq!(
            "checkout 15".parse(),
            Ok(ConsoleCommand::Checkout {
                percent_off: Some(15)
            })
        );
        assert_eq!("exit".parse(), Ok(ConsoleCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("   ".parse::<ConsoleCommand>(), Err(ParseError::Empty));
        assert_eq!(
            "dance".parse::<ConsoleCommand>(),
            Err(ParseError::Unknown("dance".into()))
        );
        assert!(matches!(
            "add".parse::<ConsoleCommand>(),
            Err(ParseError::Usage { command: "add", .. })
        ));
        assert!(matches!(
            "add 1 0".parse::<ConsoleCommand>(),
            Err(ParseError::Usage { command: "add", .. })
        ));
        assert!(matches!(
            "add x".parse::<ConsoleCommand>(),
            Err(ParseError::Usage { command: "add", .. })
        ));
        assert!(matches!(
            "checkout 150".parse::<ConsoleCommand>(),
            Err(ParseError::Usage {
                command: "checkout",
                ..
            })
        ));
    }
}
