fn main() {
    lalrpop::process_root().expect("failed to generate the parser from src/parser.lalrpop");
}
