#![macro_use]
#![allow(unused_macros)]

/// `[E]` lines, bold red. does not exit, the caller decides what a failure means
macro_rules! err {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("[E] {}", format!($($arg)*).bold().red());
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("[W] {}", format!($($arg)*).italic().yellow());
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("[I] {}", format!($($arg)*).italic().white());
    }};
}

/// positive findings
macro_rules! good {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("[+] {}", format!($($arg)*).bold().green());
    }};
}
