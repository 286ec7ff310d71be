mod tests_assembly;
mod tests_resolvers;
