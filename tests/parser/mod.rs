mod tests_grammar;
