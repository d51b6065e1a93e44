pub struct Logger;

impl Logger {
    pub fn info(msg: &str) {
        println!("[INFO] {}", msg);
    }

    pub fn error(msg: &str) {
        eprintln!("[ERROR] {}", msg);
    }

    pub fn warn(msg: &str) {
        eprintln!("[WARN] {}", msg);
    }

    #[allow(unused_variables)]
    pub fn debug(msg: &str) {
        #[cfg(debug_assertions)]
        eprintln!("[DEBUG] {}", msg);
    }
}
