pub mod driver;
pub mod webdriver;

pub use driver::Browser;
pub use webdriver::WebDriverSession;
