// Cross-component scenarios exercising the whole generation pipeline
mod scenarios;
